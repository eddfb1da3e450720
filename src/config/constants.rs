//! Configuration constants.
//!
//! This module defines the defaults used by the CLI and by `Config::default()`,
//! plus protocol limits that are not user-tunable.

/// Default DNS servers (comma separated, as accepted by `--servers`)
pub const DEFAULT_DNS_SERVERS: &str = "8.8.8.8,8.8.4.4";

/// Port appended to DNS servers given without one
pub const DNS_PORT: u16 = 53;

/// Per-attempt DNS exchange timeout in seconds.
/// Matches the usual stub-resolver exchange timeout; the worst case for one
/// name is `retry_budget + 1` of these.
pub const DNS_TIMEOUT_SECS: u64 = 2;

/// Retry budget granted per configured DNS server.
/// Two servers give four retries, i.e. up to five exchanges per name.
pub const DNS_RETRIES_PER_SERVER: usize = 2;

/// Receive buffer for a single UDP DNS response.
/// EDNS is not advertised, but some servers still answer above 512 bytes.
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Per-request HTTP timeout in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Default worker count for both the resolution and the verification pools
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default health-check path requested on every target
pub const DEFAULT_HEALTH_PATH: &str = "/nagios_check.php";

/// Default HTTP port for health checks
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Largest first-pass HTTP failure set that still earns a second pass.
/// Above this, failures are treated as widespread and reported as-is.
pub const SECOND_PASS_THRESHOLD: usize = 10;
