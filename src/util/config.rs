//! Configuration loading for auditrelay.
//!
//! Settings are read once at startup from `config.yml` in the working
//! directory. Every field has a sensible default so a missing or partial
//! file still produces a runnable configuration.

use std::path::Path;

use crate::util::constants::DEFAULT_DURATION_SECS;
use crate::util::error::{AuditRelayError, Result};

/// Runtime configuration, deserialized from `config.yml`.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name reported alongside forwarded records.
    pub app: String,

    /// `host:port` of the TCP log sink. Empty means console-only output.
    #[serde(alias = "sendurl")]
    pub send_url: String,

    /// Poll interval in seconds. Clamped to a minimum of 1.
    pub duration: u64,

    /// Comma-joined decimal event IDs to retain. Empty means no filtering.
    #[serde(alias = "winevtids")]
    pub win_evt_ids: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: crate::util::constants::APP_NAME.to_string(),
            send_url: String::new(),
            duration: DEFAULT_DURATION_SECS,
            win_evt_ids: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from the YAML file at `path`.
    ///
    /// # Errors
    /// Returns [`AuditRelayError::Config`] if the file cannot be read or
    /// does not deserialize.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = std::fs::read_to_string(path).map_err(|e| {
            AuditRelayError::Config(format!("read {}: {e}", path.display()))
        })?;
        let mut cfg: Config = serde_yaml::from_str(&buf).map_err(|e| {
            AuditRelayError::Config(format!("parse {}: {e}", path.display()))
        })?;
        if cfg.duration == 0 {
            cfg.duration = 1;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "app: relay-test\nsend_url: 10.0.0.5:4514\nduration: 15\nwin_evt_ids: \"4624,4625\""
        )
        .unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.app, "relay-test");
        assert_eq!(cfg.send_url, "10.0.0.5:4514");
        assert_eq!(cfg.duration, 15);
        assert_eq!(cfg.win_evt_ids, "4624,4625");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "send_url: logs.example.net:4514").unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.app, "auditrelay");
        assert_eq!(cfg.duration, DEFAULT_DURATION_SECS);
        assert!(cfg.win_evt_ids.is_empty());
    }

    #[test]
    fn zero_duration_is_clamped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duration: 0").unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.duration, 1);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(Path::new("definitely-not-here.yml")).unwrap_err();
        assert!(matches!(err, AuditRelayError::Config(_)));
    }
}
