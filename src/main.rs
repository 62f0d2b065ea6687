//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_checker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use link_checker::initialization::init_logger_with;
use link_checker::{run_checks, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set LINK_CHECKER_REDUCE_MOTION; a missing file is fine
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_checks(config).await {
        Ok(report) => {
            println!(
                "Checked {} link{} ({} genuine, {} fake, {} unknown, {} skipped) in {:.1}s",
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.genuine,
                report.fake,
                report.unknown,
                report.skipped,
                report.elapsed_seconds
            );
            if let Some(dir) = &report.output_dir {
                println!("Result cards saved in {}", dir.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("link_checker error: {:#}", e);
            process::exit(1);
        }
    }
}
