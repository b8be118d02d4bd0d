//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `k8s_health_check` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use k8s_health_check::initialization::init_logger_with;
use k8s_health_check::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_check(config).await {
        Ok(report) => {
            println!(
                "Collected {} endpoint{}",
                report.total_endpoints,
                if report.total_endpoints == 1 { "" } else { "s" }
            );
            if let Some(path) = &report.report_path {
                println!("Report saved to {}", path.display());
            }
            if let Some(path) = &report.results_path {
                println!(
                    "Verified {} ({} accessible, {} unreachable) in {:.1}s, results saved to {}",
                    report.verified,
                    report.reachable,
                    report.unreachable,
                    report.elapsed_seconds,
                    path.display()
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("k8s_health_check error: {:#}", e);
            process::exit(1);
        }
    }
}
