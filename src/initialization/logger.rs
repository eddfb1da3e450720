//! Logger initialization.
//!
//! Logs go to stderr so stdout carries only the summary line.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting: plain text (colored level,
/// target) or one JSON object per line.
///
/// `RUST_LOG` is read first; the provided `level` overrides it for this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=domain_health=debug,reqwest=info domain_health a.example b.example
///
/// # Show per-domain failure details
/// domain_health --log-level debug a.example b.example
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.target(env_logger::Target::Stderr);
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    // Truncated or malformed UDP answers are reported through our own errors.
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("domain_health", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
