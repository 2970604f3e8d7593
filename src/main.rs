use clap::Parser;
use tradescan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
