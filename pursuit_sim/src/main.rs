// pursuit_sim/src/main.rs

//! Headless scenario runner.
//!
//! `cargo run -p pursuit_sim -- --scenario-dir assets/scenarios`
//! Log verbosity follows `RUST_LOG` (default `info`).

use clap::Parser;
use pursuit_sim::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    pursuit_sim::run(&cli)
}
