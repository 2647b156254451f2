//! CLI entry point for the dashboard core.
//!
//! # Responsibility
//! - Verify `payroll_core` linkage with a deterministic smoke output.
//! - Inspect, export or clear a storage file without the UI.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use payroll_core::db::open_db;
use payroll_core::{Dashboard, DashboardService, SqliteStore};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("payroll_core ping={}", payroll_core::ping());
        println!("payroll_core version={}", payroll_core::core_version());
        return ExitCode::SUCCESS;
    };

    match run(&command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} failed: {err}", command_name(&command));
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<(), String> {
    match command {
        Command::Summary { db_path } => with_dashboard(db_path, |dashboard| {
            let totals = dashboard.totals();
            println!("period={}", dashboard.current_period());
            println!("gross_pay={:.2}", totals.gross_pay);
            println!("total_deductions={:.2}", totals.total_deductions);
            println!("net_pay={:.2}", totals.net_pay);
            println!("total_expenses={:.2}", totals.total_expenses);
            println!("remaining_balance={:.2}", totals.remaining_balance);
            Ok(())
        }),
        Command::Export { db_path, raw } => with_dashboard(db_path, |dashboard| {
            let json = if *raw {
                let snapshot = dashboard
                    .service()
                    .export_raw()
                    .map_err(|err| err.to_string())?;
                serde_json::to_string_pretty(&snapshot).map_err(|err| err.to_string())?
            } else {
                dashboard.export_json().map_err(|err| err.to_string())?
            };
            println!("{json}");
            Ok(())
        }),
        Command::Clear { db_path } => with_dashboard(db_path, |dashboard| {
            if dashboard.reset() {
                println!("cleared");
                Ok(())
            } else {
                Err("some keys could not be removed".to_string())
            }
        }),
    }
}

fn with_dashboard(
    db_path: &Path,
    f: impl FnOnce(&mut Dashboard<SqliteStore<'_>>) -> Result<(), String>,
) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let mut dashboard = Dashboard::open(DashboardService::new(SqliteStore::new(&conn)));
    f(&mut dashboard)
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Summary { .. } => "summary",
        Command::Export { .. } => "export",
        Command::Clear { .. } => "clear",
    }
}
