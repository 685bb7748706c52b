//! Poll-window timestamp helpers.
//!
//! The PowerShell queries take their window bounds as `MM/DD/YYYY HH:MM:SS`
//! local-time strings; these helpers keep that formatting in one place.

use chrono::{DateTime, Local};

use crate::util::constants::TIME_LAYOUT;

/// Format a local timestamp as a PowerShell query window bound,
/// e.g. `11/20/2019 08:59:30`.
pub fn format_window_bound(ts: &DateTime<Local>) -> String {
    ts.format(TIME_LAYOUT).to_string()
}

/// The current local time formatted as a window bound.
pub fn now_window_bound() -> String {
    format_window_bound(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_bound_format() {
        let ts = Local.with_ymd_and_hms(2019, 11, 20, 8, 59, 30).unwrap();
        assert_eq!(format_window_bound(&ts), "11/20/2019 08:59:30");
    }
}
