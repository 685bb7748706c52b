//! PowerShell capability detection.
//!
//! `$PSVersionTable.PSVersion` prints a small table:
//!
//! ```text
//! Major  Minor  Build  Revision
//! -----  -----  -----  --------
//! 5      1      17763  1007
//! ```
//!
//! The third line of the table carries the version numbers. Major.minor at
//! or above 5.1 selects the modern `Get-WinEvent` layout; anything older
//! falls back to `Get-EventLog`.

use regex::Regex;

use crate::core::splitter::LayoutVariant;
use crate::util::constants::{BEST_VERSION, PAYLOAD_TAIL, VERSION_BANNER};
use crate::util::error::{AuditRelayError, Result};

/// A parsed PowerShell version (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PsVersion {
    pub major: u32,
    pub minor: u32,
}

impl PsVersion {
    /// The query layout this version supports.
    pub fn layout(self) -> LayoutVariant {
        if (self.major, self.minor) >= BEST_VERSION {
            LayoutVariant::Modern
        } else {
            LayoutVariant::Legacy
        }
    }
}

impl std::fmt::Display for PsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse the decoded output of `$PSVersionTable.PSVersion`.
///
/// The table is bounded by the same kind of markers as the query payloads;
/// after stripping them, the third line holds the numeric columns.
///
/// # Errors
/// [`AuditRelayError::VersionDetect`] when the table shape is not recognized.
pub fn parse_ps_version(output: &str) -> Result<PsVersion> {
    let payload = crate::core::splitter::strip_payload(output, VERSION_BANNER, PAYLOAD_TAIL);
    let lines: Vec<&str> = payload.split("\r\n").collect();
    if lines.len() <= 2 {
        return Err(AuditRelayError::VersionDetect(
            "version table has fewer than three lines".into(),
        ));
    }

    // Two leading whitespace-separated numeric columns: major and minor.
    let pattern = Regex::new(r"^\s*(\d+)\s+(\d+)").expect("static regex");
    let caps = pattern.captures(lines[2]).ok_or_else(|| {
        AuditRelayError::VersionDetect(format!("unrecognized version line: '{}'", lines[2]))
    })?;

    let major = caps[1]
        .parse()
        .map_err(|_| AuditRelayError::VersionDetect("major out of range".into()))?;
    let minor = caps[2]
        .parse()
        .map_err(|_| AuditRelayError::VersionDetect("minor out of range".into()))?;

    Ok(PsVersion { major, minor })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION_OUTPUT: &str = "\r\nMajor  Minor  Build  Revision\r\n-----  -----  -----  --------\r\n5      1      17763  1007\r\n\r\n\r\n\r\n";

    #[test]
    fn parses_version_table() {
        let ver = parse_ps_version(VERSION_OUTPUT).unwrap();
        assert_eq!(ver, PsVersion { major: 5, minor: 1 });
        assert_eq!(ver.to_string(), "5.1");
    }

    #[test]
    fn five_one_selects_modern_layout() {
        assert_eq!(
            PsVersion { major: 5, minor: 1 }.layout(),
            LayoutVariant::Modern
        );
    }

    #[test]
    fn older_versions_select_legacy_layout() {
        assert_eq!(
            PsVersion { major: 4, minor: 0 }.layout(),
            LayoutVariant::Legacy
        );
        assert_eq!(
            PsVersion { major: 2, minor: 0 }.layout(),
            LayoutVariant::Legacy
        );
    }

    #[test]
    fn double_digit_major_selects_modern_layout() {
        // Numeric comparison: 7.4 >= 5.1 even though "7" > "5" and
        // "10" < "5" lexically.
        assert_eq!(
            PsVersion { major: 7, minor: 4 }.layout(),
            LayoutVariant::Modern
        );
    }

    #[test]
    fn short_output_is_a_detection_error() {
        let err = parse_ps_version("\r\nonly one line\r\n\r\n\r\n\r\n").unwrap_err();
        assert!(matches!(err, AuditRelayError::VersionDetect(_)));
    }

    #[test]
    fn marker_only_output_is_a_detection_error() {
        // Banner and tail coincide: no version table at all.
        let err = parse_ps_version("\r\n\r\n\r\n").unwrap_err();
        assert!(matches!(err, AuditRelayError::VersionDetect(_)));
    }
}
