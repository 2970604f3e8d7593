//! Current-snapshot cell shared between the scan task and readers.

use crate::domain::model::{Snapshot, TradingSystem};
use crate::ports::snapshot_port::SnapshotPort;
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the snapshot from the most recent successful scan cycle.
///
/// Publication swaps one `Arc` under a write lock and readers clone the `Arc`
/// under a read lock, so a reader never observes a half-built snapshot and the
/// lock is never held across scan I/O. Starts out holding an empty snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot as a single atomic step.
    pub fn publish(&self, snapshot: Snapshot) {
        *self.current.write() = Arc::new(snapshot);
    }

    /// The snapshot that is current right now. Never blocks on an in-progress
    /// scan; a scan in flight keeps the previous snapshot visible.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }
}

impl SnapshotPort for SnapshotStore {
    fn trading_systems(&self) -> Vec<Arc<TradingSystem>> {
        self.current().trading_systems()
    }
}
