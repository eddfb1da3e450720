//! domain_health library: batch DNS resolution and HTTP health checking
//!
//! Every domain is resolved through a configured set of DNS servers (with
//! retries) and then checked with an HTTP GET against the resolved address,
//! with the `Host` header carrying the domain. Failures are split into DNS
//! failures and HTTP failures; a small set of HTTP failures is re-checked once
//! before being reported.
//!
//! # Example
//!
//! ```no_run
//! use domain_health::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: vec!["example.com".to_string(), "example.org".to_string()],
//!     concurrency: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("{}", report.summary_line());
//! std::process::exit(report.exit_code());
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
mod check;
pub mod config;
mod dns;
mod domain;
mod error_handling;
pub mod initialization;
mod pipeline;

// Re-export public API
pub use app::report::{DNS_CRITICAL_PREFIX, HTTP_CRITICAL_PREFIX, SUCCESS_MESSAGE};
pub use app::{CheckReport, EXIT_CRITICAL, EXIT_OK};
pub use check::{HttpChecker, Verify};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use dns::{DnsExchange, DnsResolver, Resolve, ResolverConfig, UdpExchange};
pub use domain::DomainTarget;
pub use error_handling::{CheckError, DnsError, InitializationError};
pub use pipeline::{needs_second_pass, Pipeline};
pub use run::run_check;

// Internal run module (wires initialization to the pipeline)
mod run {
    use log::info;

    use crate::app::CheckReport;
    use crate::check::HttpChecker;
    use crate::config::Config;
    use crate::error_handling::InitializationError;
    use crate::initialization::{init_client, init_resolver};
    use crate::pipeline::Pipeline;

    /// Runs one batch check with the provided configuration.
    ///
    /// This is the main entry point for the library. It builds the shared DNS
    /// resolver and HTTP client, runs the pipeline over `config.domains`, and
    /// returns the reconciled report. Per-domain DNS and HTTP failures end up
    /// in the report, never in the `Err` branch.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DNS server list or resolv.conf cannot be loaded
    /// - The HTTP client cannot be built
    pub async fn run_check(config: Config) -> Result<CheckReport, InitializationError> {
        let resolver = init_resolver(&config).await?;
        let client = init_client(&config)?;
        let checker = HttpChecker::from_config(client, &config);

        let pipeline = Pipeline::from_config(resolver, std::sync::Arc::new(checker), &config);
        let report = pipeline.run(&config.domains).await;

        info!(
            "Checked {} domain(s) in {:.2}s ({} DNS failure(s), {} HTTP failure(s))",
            report.total,
            report.elapsed_seconds,
            report.dns_failures.len(),
            report.http_failures.len()
        );
        if config.keep_alive {
            report.log_failure_bodies();
        }

        Ok(report)
    }
}
