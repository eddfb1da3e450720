//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Builds the shared health-check client.
///
/// - One overall per-request timeout (connect, send, headers and body);
///   `timeout_seconds == 0` means no timeout
/// - Redirects are not followed, so a 3xx is reported as-is
/// - With `keep_alive` off, no idle connections are pooled and every check
///   opens a fresh connection
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn build_client(
    timeout_seconds: u64,
    keep_alive: bool,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new().redirect(reqwest::redirect::Policy::none());
    if timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_seconds));
    }
    if !keep_alive {
        builder = builder.pool_max_idle_per_host(0);
    }
    builder.build()
}

/// Initializes the shared HTTP client from `config`.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = build_client(config.timeout_seconds, config.keep_alive)?;
    Ok(Arc::new(client))
}
