//! Trading system and trade representations.

use std::collections::HashMap;
use std::sync::Arc;

/// One round-trip position parsed from a TRADE record. Dates are 8-digit
/// `YYYYMMDD` integers; `position` keeps the export's signed long/short
/// encoding unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry_date: i32,
    pub entry_time: i32,
    pub entry_price: f64,
    pub entry_label: String,
    pub exit_date: i32,
    pub exit_time: i32,
    pub exit_price: f64,
    pub exit_label: String,
    pub gross_profit: f64,
    pub contracts: i32,
    pub position: i32,
}

/// One export file's worth of identity plus its trades, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradingSystem {
    pub name: String,
    pub data_symbol: String,
    pub trades: Vec<Trade>,
}

impl TradingSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The complete set of trading systems produced by one scan cycle, keyed by
/// source file name. Immutable once published; replaced wholesale by the next
/// cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    systems: HashMap<String, Arc<TradingSystem>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: String, system: TradingSystem) {
        self.systems.insert(file_name, Arc::new(system));
    }

    pub fn get(&self, file_name: &str) -> Option<&Arc<TradingSystem>> {
        self.systems.get(file_name)
    }

    /// All trading systems, in unspecified order.
    pub fn trading_systems(&self) -> Vec<Arc<TradingSystem>> {
        self.systems.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<TradingSystem>)> {
        self.systems.iter()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
