//! Read access port for the external service layer.

use crate::domain::model::TradingSystem;
use std::sync::Arc;

/// Lists the trading systems in the current snapshot, in unspecified order.
/// Implementations must never block on an in-progress scan.
pub trait SnapshotPort {
    fn trading_systems(&self) -> Vec<Arc<TradingSystem>>;
}
