//! Garita - vehicle check-out/check-in inspection tracker
//!
//! Tracks exit/entry inspections per plate over a sheet-backed store,
//! enforcing the inspection lifecycle, tire configurations, odometer
//! monotonicity and branch consecutive numbers.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
