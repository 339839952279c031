//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `mirror_probe` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Run summary and exit-code policy
//!
//! All probing logic lives in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mirror_probe::initialization::init_logger_with;
use mirror_probe::{evaluate_exit_code, run_probe, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let fail_on = config.fail_on.clone();
    let fail_pct = config.fail_pct;

    match run_probe(config).await {
        Ok(report) => {
            println!(
                "Probed {} URL{} ({} suppressed, {} reported) in {:.1}s",
                report.dispatched,
                if report.dispatched == 1 { "" } else { "s" },
                report.suppressed,
                report.reported,
                report.elapsed_seconds
            );
            let code = evaluate_exit_code(&fail_on, fail_pct, &report);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("mirror_probe error: {:#}", e);
            process::exit(1);
        }
    }
}
