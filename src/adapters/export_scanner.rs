//! Directory scanner and per-file ingestor for export files.

use crate::domain::error::TradescanError;
use crate::domain::model::{Snapshot, TradingSystem};
use crate::domain::record;
use crate::domain::scan_config::ScanConfig;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

pub struct ExportScanner {
    config: ScanConfig,
}

impl ExportScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Run one scan cycle: list the directory, ingest every regular file with
    /// the configured extension and assemble a fresh snapshot.
    ///
    /// Files that fail to open, read or parse are logged and left out of the
    /// snapshot; only a failure to list the directory itself aborts the cycle.
    pub fn scan(&self) -> Result<Snapshot, TradescanError> {
        info!(dir = %self.config.dir.display(), "fetching export files");

        let entries = std::fs::read_dir(&self.config.dir)?;
        let mut snapshot = Snapshot::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.ends_with(&self.config.extension) {
                continue;
            }
            match entry.file_type() {
                Ok(file_type) if !file_type.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!(file = %file_name, error = %e, "skipping entry of unknown type");
                    continue;
                }
            }

            match ingest_file(&entry.path()) {
                Ok(ts) => {
                    snapshot.insert(file_name, ts);
                }
                Err(e) => {
                    warn!(file = %file_name, error = %e, "excluding file from snapshot");
                }
            }
        }

        Ok(snapshot)
    }
}

/// Parse one export file into a trading system. All-or-nothing: the first
/// invalid line or read error discards the whole file. The file handle is
/// scoped to this call and released on every exit path.
pub fn ingest_file(path: &Path) -> Result<TradingSystem, TradescanError> {
    info!(file = %path.display(), "handling export file");

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut ts = TradingSystem::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        record::apply_line(&mut ts, &line)?;
    }

    Ok(ts)
}
