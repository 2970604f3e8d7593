//! Periodic scan scheduling.

use crate::adapters::export_scanner::ExportScanner;
use crate::domain::scan_config::ScanConfig;
use crate::domain::snapshot::SnapshotStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Grace period before the first cycle so the surrounding process can finish
/// its own startup.
pub const STARTUP_DELAY: Duration = Duration::from_secs(2);

/// Spawn the background scan loop: one cycle after [`STARTUP_DELAY`], then
/// one per configured period, forever.
///
/// Cycles run strictly one after another on this single task; if a scan
/// overruns the period the next tick is serviced only once it finishes
/// (`MissedTickBehavior::Delay`). A failed cycle leaves the previously
/// published snapshot in place and waits for the next tick.
pub fn start_periodic_scan(config: ScanConfig, store: Arc<SnapshotStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(STARTUP_DELAY).await;

        let mut ticker = tokio::time::interval(config.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let scanner = Arc::new(ExportScanner::new(config));
        loop {
            // First tick completes immediately.
            ticker.tick().await;
            run_cycle(Arc::clone(&scanner), &store).await;
        }
    })
}

/// Run one scan cycle to completion and publish its snapshot. The blocking
/// file I/O runs off the async runtime.
pub async fn run_cycle(scanner: Arc<ExportScanner>, store: &SnapshotStore) {
    let result = tokio::task::spawn_blocking(move || scanner.scan()).await;

    match result {
        Ok(Ok(snapshot)) => {
            info!(systems = snapshot.len(), "publishing snapshot");
            store.publish(snapshot);
        }
        Ok(Err(e)) => {
            error!(error = %e, "scan cycle failed, keeping previous snapshot");
        }
        Err(e) => {
            error!(error = %e, "scan task failed, keeping previous snapshot");
        }
    }
}
