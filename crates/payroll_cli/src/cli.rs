//! Command-line schema for `payroll_cli`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "payroll_cli")]
#[command(about = "Inspect, export or clear a payroll dashboard storage file")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Subcommand to execute; prints the core smoke output when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print derived totals for the stored slip and expenses
    Summary {
        /// SQLite storage file
        db_path: PathBuf,
    },
    /// Print the export document as JSON
    Export {
        /// SQLite storage file
        db_path: PathBuf,
        /// Print slices exactly as stored instead of normalized
        #[arg(long)]
        raw: bool,
    },
    /// Delete every stored slice
    Clear {
        /// SQLite storage file
        db_path: PathBuf,
    },
}
