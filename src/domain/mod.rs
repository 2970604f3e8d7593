//! Core domain types and logic.

pub mod model;
pub mod record;
pub mod snapshot;
pub mod scan_config;
pub mod error;
