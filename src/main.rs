//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_health` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - The summary line on stdout and the exit status
//!
//! Exit status: 0 when every domain passed, 2 when any failed, 1 on usage or
//! initialization errors.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_health::initialization::init_logger_with;
use domain_health::{run_check, Config, Opt};

/// Exit status for usage and initialization errors.
const EXIT_USAGE: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        Err(e) => {
            // --help and --version print to stdout and are not errors
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };
    let config = Config::from(opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_check(config).await {
        Ok(report) => {
            println!("{}", report.summary_line());
            process::exit(report.exit_code());
        }
        Err(e) => {
            eprintln!("domain_health error: {:#}", e);
            process::exit(EXIT_USAGE);
        }
    }
}
