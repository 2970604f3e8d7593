pub mod file_config_adapter;
pub mod export_scanner;
pub mod scheduler;
