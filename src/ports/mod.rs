pub mod config_port;
pub mod snapshot_port;
