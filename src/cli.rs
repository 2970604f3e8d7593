//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::adapters::export_scanner::ExportScanner;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::scheduler::start_periodic_scan;
use crate::domain::error::TradescanError;
use crate::domain::scan_config::{build_scan_config, ScanConfig};
use crate::domain::snapshot::SnapshotStore;

#[derive(Parser, Debug)]
#[command(name = "tradescan", about = "Trading-system export file scanner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the periodic scan agent
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run a single scan cycle and print the result
    ScanOnce {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_agent(&config),
        Command::ScanOnce { config } => run_scan_once(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TradescanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_scan_config(config_path: &PathBuf) -> Result<ScanConfig, ExitCode> {
    let adapter = load_config(config_path)?;
    build_scan_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run_agent(config_path: &PathBuf) -> ExitCode {
    init_tracing();

    eprintln!("Loading config from {}", config_path.display());
    let scan_config = match load_scan_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    eprintln!(
        "Scanning {} for *{} every {}h",
        scan_config.dir.display(),
        scan_config.extension,
        scan_config.period_hours
    );

    // The snapshot store is what an external service layer would read from
    // while the scheduler replaces snapshots in the background.
    let store = Arc::new(SnapshotStore::new());

    tokio::runtime::Runtime::new().unwrap().block_on(async {
        let scheduler = start_periodic_scan(scan_config, Arc::clone(&store));
        let _ = scheduler.await;
    });

    ExitCode::SUCCESS
}

fn run_scan_once(config_path: &PathBuf) -> ExitCode {
    init_tracing();

    let scan_config = match load_scan_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let scanner = ExportScanner::new(scan_config);
    let snapshot = match scanner.scan() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut entries: Vec<_> = snapshot.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (file_name, ts) in entries {
        println!(
            "{}: {} [{}], {} trades",
            file_name,
            ts.name,
            ts.data_symbol,
            ts.trades.len()
        );
    }
    eprintln!("{} trading systems found", snapshot.len());

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    match load_scan_config(config_path) {
        Ok(c) => {
            eprintln!(
                "Configuration is valid: dir={}, extension={}, period_hours={}",
                c.dir.display(),
                c.extension,
                c.period_hours
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
