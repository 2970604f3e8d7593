//! Scan configuration record and validation.

use crate::domain::error::TradescanError;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;
use std::time::Duration;

/// Everything the scan pipeline needs from the surrounding process.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory scanned each cycle.
    pub dir: PathBuf,
    /// Required file-name suffix, e.g. `.txt`.
    pub extension: String,
    /// Whole-hour interval between cycles.
    pub period_hours: u64,
}

impl ScanConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_hours * 3600)
    }
}

/// Build and validate a [`ScanConfig`] from the `[scan]` section.
pub fn build_scan_config(config: &dyn ConfigPort) -> Result<ScanConfig, TradescanError> {
    let dir = config
        .get_string("scan", "dir")
        .ok_or_else(|| TradescanError::ConfigMissing {
            section: "scan".into(),
            key: "dir".into(),
        })?;

    let extension =
        config
            .get_string("scan", "extension")
            .ok_or_else(|| TradescanError::ConfigMissing {
                section: "scan".into(),
                key: "extension".into(),
            })?;
    if extension.is_empty() {
        return Err(TradescanError::ConfigInvalid {
            section: "scan".into(),
            key: "extension".into(),
            reason: "extension must not be empty".into(),
        });
    }

    let period_hours = config.get_int("scan", "period_hours", 0);
    if period_hours < 1 {
        return Err(TradescanError::ConfigInvalid {
            section: "scan".into(),
            key: "period_hours".into(),
            reason: "period_hours must be a positive whole number of hours".into(),
        });
    }

    Ok(ScanConfig {
        dir: PathBuf::from(dir),
        extension,
        period_hours: period_hours as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn builds_from_complete_section() {
        let config = adapter("[scan]\ndir = /var/exports\nextension = .txt\nperiod_hours = 6\n");
        let scan = build_scan_config(&config).unwrap();

        assert_eq!(scan.dir, PathBuf::from("/var/exports"));
        assert_eq!(scan.extension, ".txt");
        assert_eq!(scan.period_hours, 6);
        assert_eq!(scan.period(), Duration::from_secs(6 * 3600));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let config = adapter("[scan]\nextension = .txt\nperiod_hours = 1\n");
        let err = build_scan_config(&config).unwrap_err();
        assert!(matches!(err, TradescanError::ConfigMissing { ref key, .. } if key == "dir"));
    }

    #[test]
    fn missing_extension_is_an_error() {
        let config = adapter("[scan]\ndir = /var/exports\nperiod_hours = 1\n");
        let err = build_scan_config(&config).unwrap_err();
        assert!(
            matches!(err, TradescanError::ConfigMissing { ref key, .. } if key == "extension")
        );
    }

    #[test]
    fn zero_period_is_an_error() {
        let config = adapter("[scan]\ndir = /var/exports\nextension = .txt\nperiod_hours = 0\n");
        let err = build_scan_config(&config).unwrap_err();
        assert!(
            matches!(err, TradescanError::ConfigInvalid { ref key, .. } if key == "period_hours")
        );
    }

    #[test]
    fn non_numeric_period_is_an_error() {
        let config =
            adapter("[scan]\ndir = /var/exports\nextension = .txt\nperiod_hours = soon\n");
        assert!(build_scan_config(&config).is_err());
    }
}
