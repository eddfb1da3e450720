//! Error handling.
//!
//! This module provides the error types used across the crate:
//! - **Initialization errors**: fatal configuration problems surfaced before any work starts
//! - **DNS errors**: per-name resolution failures, split into transient and permanent
//! - **Check errors**: per-target HTTP failures (transport or status)

mod types;

// Re-export public API
pub use types::{CheckError, DnsError, InitializationError};

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::ResponseCode;
    use reqwest::StatusCode;
    use std::path::PathBuf;

    #[test]
    fn test_dns_error_transient_classification() {
        assert!(DnsError::Timeout.is_transient());
        assert!(DnsError::ResponseCode(ResponseCode::ServFail).is_transient());
        assert!(DnsError::ResponseCode(ResponseCode::Refused).is_transient());
    }

    #[test]
    fn test_dns_error_permanent_classification() {
        assert!(!DnsError::ResponseCode(ResponseCode::NXDomain).is_transient());
        assert!(!DnsError::ResponseCode(ResponseCode::FormErr).is_transient());
        assert!(!DnsError::EmptyAnswer.is_transient());
        assert!(!DnsError::Protocol("bad".to_string()).is_transient());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(!DnsError::from(io).is_transient());
    }

    #[test]
    fn test_resolv_conf_missing_message() {
        let err = InitializationError::ResolvConfMissingError(PathBuf::from("/nope/resolv.conf"));
        assert_eq!(err.to_string(), "no such file or directory: /nope/resolv.conf");
    }

    #[test]
    fn test_check_error_status_message() {
        let err = CheckError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().contains("503"));
    }
}
