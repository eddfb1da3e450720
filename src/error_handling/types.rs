//! Error type definitions.
//!
//! Initialization errors are fatal and stop the process before any checks run.
//! DNS and HTTP errors are never fatal: the pipeline turns them into failure
//! classifications for the affected domain.

use std::path::PathBuf;

use hickory_proto::op::ResponseCode;
use log::SetLoggerError;
use reqwest::{Error as ReqwestError, StatusCode};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The resolv.conf path does not exist.
    #[error("no such file or directory: {}", .0.display())]
    ResolvConfMissingError(PathBuf),

    /// The resolv.conf file exists but could not be read or parsed.
    #[error("Failed to load resolv.conf {}: {source}", .path.display())]
    ResolvConfError {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O or parse failure
        #[source]
        source: std::io::Error,
    },

    /// A DNS server entry could not be turned into a socket address.
    #[error("Invalid DNS server '{server}': {reason}")]
    DnsServerError {
        /// The entry as given
        server: String,
        /// Why it was rejected
        reason: String,
    },

    /// No DNS servers were left after loading the configuration.
    #[error("DNS resolver initialization error: no DNS servers configured")]
    NoDnsServersError,
}

/// Errors from resolving a single name.
///
/// - Transient (`Timeout`, SERVFAIL, REFUSED): retried within the resolver's budget
/// - Permanent (any other response code, e.g. NXDOMAIN): returned immediately
/// - `EmptyAnswer`: the server answered but had no A records
#[derive(Error, Debug)]
pub enum DnsError {
    /// No response within the per-attempt timeout.
    #[error("DNS query timed out")]
    Timeout,

    /// Socket-level failure talking to the server.
    #[error("DNS transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Malformed query or response.
    #[error("DNS protocol error: {0}")]
    Protocol(String),

    /// The server answered with a non-success response code.
    #[error("DNS server answered {0:?}")]
    ResponseCode(ResponseCode),

    /// The server answered successfully but without any A record.
    #[error("DNS answer contained no A records")]
    EmptyAnswer,

    /// The name cannot be encoded as a DNS name.
    #[error("Invalid domain name '{name}': {reason}")]
    InvalidName {
        /// The name as given
        name: String,
        /// Why encoding failed
        reason: String,
    },
}

impl DnsError {
    /// Returns true for failures that are expected to clear up on another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DnsError::Timeout
                | DnsError::ResponseCode(ResponseCode::ServFail)
                | DnsError::ResponseCode(ResponseCode::Refused)
        )
    }
}

/// Errors from a single HTTP health check.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Connection refused, reset, timed out, or the request could not be sent.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The target answered with something other than 200.
    #[error("HTTP status {0}")]
    Status(StatusCode),

    /// The target has no resolved address and cannot be checked.
    #[error("target '{0}' has no resolved address")]
    Unresolved(String),
}
