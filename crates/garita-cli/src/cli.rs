//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "garita", version, about = "Vehicle check-out/check-in inspection tracker")]
pub struct Cli {
    /// Directory holding the sheet store (overrides the config file)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Config file path (defaults to ~/.config/garita/garita.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report whether a plate must register an exit or an entry next
    Check {
        /// License plate
        plate: String,
    },

    /// Register an exit inspection from a JSON submission file
    Exit {
        /// Path to the submission JSON
        file: PathBuf,
    },

    /// Complete the open exit of a plate from a JSON submission file
    Entry {
        /// Path to the submission JSON
        file: PathBuf,
    },

    /// Issue the next consecutive document number for a branch
    NextNumber {
        /// Full branch name as it appears in the counter header
        branch: String,
    },

    /// Show the inspection history of a plate
    History {
        /// License plate
        plate: String,
    },

    /// Import fleet registry rows from a CSV file
    ImportRegistry {
        /// CSV with header vehicle_number,plate,vehicle_type,wheel_count
        file: PathBuf,
    },
}
