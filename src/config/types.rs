//! Configuration types and CLI options.
//!
//! `Opt` is the clap-derived command line; `Config` is the library-side
//! configuration that can be built without clap and is what the pipeline reads.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_DNS_SERVERS, DEFAULT_HEALTH_PATH, DEFAULT_HTTP_PORT,
    DNS_TIMEOUT_SECS, HTTP_TIMEOUT_SECS, SECOND_PASS_THRESHOLD,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Logs go to stderr; stdout carries only the one-line summary so the binary
/// can be wired straight into a monitoring check.
///
/// # Examples
///
/// ```bash
/// # Check two sites through the default resolvers
/// domain_health example.com example.org
///
/// # Use the system resolvers, a custom path and port
/// domain_health -r /etc/resolv.conf -u /status -p 8080 example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "domain_health",
    about = "Resolves domains and health-checks each one over HTTP."
)]
pub struct Opt {
    /// Domains (or IP literals) to check
    #[arg(value_name = "DOMAIN", required = true)]
    pub domains: Vec<String>,

    /// DNS servers, comma separated
    #[arg(short = 's', long, default_value = DEFAULT_DNS_SERVERS)]
    pub servers: String,

    /// Path to a resolv.conf-style file; replaces --servers when given
    #[arg(short = 'r', long)]
    pub resolv_conf: Option<PathBuf>,

    /// Check timeout in seconds (0 disables the timeout)
    #[arg(short = 't', long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Checks concurrency
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// URL path to check
    #[arg(short = 'u', long = "url", default_value = DEFAULT_HEALTH_PATH)]
    pub health_path: String,

    /// Port number for check
    #[arg(short = 'p', long, default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,

    /// Turn on keep-alive connections and capture response bodies
    #[arg(short = 'k', long)]
    pub keep_alive: bool,

    /// Largest first-pass failure count that is re-checked once more
    #[arg(long, default_value_t = SECOND_PASS_THRESHOLD)]
    pub second_pass_threshold: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use domain_health::Config;
///
/// let config = Config {
///     domains: vec!["example.com".to_string()],
///     concurrency: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domains or IP literals to check, in input order (duplicates allowed)
    pub domains: Vec<String>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// DNS servers as `host` or `host:port`
    pub dns_servers: Vec<String>,

    /// resolv.conf-style file that replaces `dns_servers` when set
    pub resolv_conf: Option<PathBuf>,

    /// Per-attempt DNS timeout in seconds
    pub dns_timeout_seconds: u64,

    /// Per-request HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Worker count for each pool
    pub concurrency: usize,

    /// Path requested on each target, always starting with `/`
    pub health_path: String,

    /// Port the health check connects to
    pub port: u16,

    /// Keep connections alive between checks and capture response bodies
    pub keep_alive: bool,

    /// Largest first-pass failure set that gets a second pass
    pub second_pass_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            dns_servers: split_server_list(DEFAULT_DNS_SERVERS),
            resolv_conf: None,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            port: DEFAULT_HTTP_PORT,
            keep_alive: false,
            second_pass_threshold: SECOND_PASS_THRESHOLD,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domains: opt.domains,
            log_level: opt.log_level,
            log_format: opt.log_format,
            dns_servers: split_server_list(&opt.servers),
            resolv_conf: opt.resolv_conf,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            timeout_seconds: opt.timeout,
            concurrency: opt.concurrency,
            health_path: normalize_health_path(&opt.health_path),
            port: opt.port,
            keep_alive: opt.keep_alive,
            second_pass_threshold: opt.second_pass_threshold,
        }
    }
}

/// Splits a comma-separated server list.
///
/// Entries are trimmed but empty entries are kept, so `"8.8.8.8,,"` surfaces
/// as a malformed list at resolver initialization instead of being silently
/// shortened.
pub fn split_server_list(servers: &str) -> Vec<String> {
    servers.split(',').map(|s| s.trim().to_string()).collect()
}

/// Ensures the health path starts with a single leading `/`.
pub fn normalize_health_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
