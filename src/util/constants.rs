//! Application-wide constants for auditrelay.
//!
//! Centralising the query templates and text-boundary markers here keeps the
//! parsing code free of magic strings and makes the console-format contract
//! auditable in one place.

/// Application display name, reported to the log sink.
pub const APP_NAME: &str = "auditrelay";

/// Application version string.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time layout for the PowerShell query window bounds,
/// e.g. `11/20/2019 08:59:30` (chrono format string).
pub const TIME_LAYOUT: &str = "%m/%d/%Y %H:%M:%S";

/// Minimum PowerShell version for the modern `Get-WinEvent` query path.
pub const BEST_VERSION: (u32, u32) = (5, 1);

/// Command that prints the PowerShell version table.
pub const CMD_VERSION: &str = "$PSVersionTable.PSVersion";

/// Variable-assignment preamble fed to PowerShell before the modern query.
/// Placeholders are filled with the window's begin and end timestamps.
pub const CMD_VARS: &str = "$Begin = Get-Date -Date '{begin}'\n$End = Get-Date -Date '{end}'\n";

/// Modern Security-log query (PowerShell >= 5.1).
pub const CMD_WIN_EVENT: &str = "Get-WinEvent -FilterHashtable @{LogName='Security';StartTime=$Begin;EndTime=$End} | Select-Object -Property *\n";

/// Legacy Security-log query (PowerShell < 5.1).
/// Placeholders are filled with the window's begin and end timestamps.
pub const CMD_EVENT_LOG: &str = "Get-EventLog -LogName Security | Where-Object {$_.TimeGenerated -ge '{begin}' -and $_.TimeGenerated -lt '{end}'} | Select-Object -Property *\n";

/// Exit command terminating the interactive PowerShell session.
pub const CMD_EXIT: &str = "exit\n";

/// Leading banner preceding the modern layout's data payload: the echoed
/// query command followed by a blank line.
pub const WIN_EVENT_BANNER: &str = "Get-WinEvent -FilterHashtable @{LogName='Security';StartTime=$Begin;EndTime=$End} | Select-Object -Property *\n\r\n\r\n";

/// Leading banner preceding the legacy layout's data payload.
pub const EVENT_LOG_BANNER: &str = "\r\n\r\n";

/// Trailing marker after the data payload (both layouts).
pub const PAYLOAD_TAIL: &str = "\r\n\r\n\r\n";

/// Banner preceding the version table in `$PSVersionTable.PSVersion` output.
pub const VERSION_BANNER: &str = "\r\n";

/// Default poll interval in seconds when config.yml does not set one.
pub const DEFAULT_DURATION_SECS: u64 = 30;

/// Path of the configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "config.yml";
