//! Check targets and input normalization.
//!
//! Key items:
//! - `DomainTarget` - a domain paired with its resolved address and captured body
//! - `dedup_domains()` - order-preserving duplicate removal
//! - `parse_ip_literal()` - detects inputs that need no DNS lookup

use std::collections::HashSet;
use std::net::IpAddr;

/// A domain on its way through the pipeline.
///
/// Created by a resolution worker; `address` is `None` when resolution failed.
/// The HTTP check may attach `response_body` when body capture is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    /// The name exactly as given on input
    pub name: String,
    /// First resolved address, or the literal itself for IP inputs
    pub address: Option<IpAddr>,
    /// Response body captured by the HTTP check (keep-alive mode only)
    pub response_body: Option<String>,
    /// Why resolution failed; diagnostics only, never used for classification
    pub resolution_error: Option<String>,
}

impl DomainTarget {
    /// A target with a usable address.
    pub fn resolved(name: impl Into<String>, address: IpAddr) -> Self {
        Self {
            name: name.into(),
            address: Some(address),
            response_body: None,
            resolution_error: None,
        }
    }

    /// A target whose resolution failed.
    pub fn unresolved(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            response_body: None,
            resolution_error: Some(reason.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.address.is_some()
    }
}

/// Removes duplicate names, keeping the first occurrence of each.
///
/// Matching is exact and case-sensitive: `Example.com` and `example.com` are
/// different inputs.
pub fn dedup_domains<S: AsRef<str>>(domains: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(domains.len());
    domains
        .iter()
        .map(|d| d.as_ref())
        .filter(|d| seen.insert(*d))
        .map(str::to_string)
        .collect()
}

/// Returns the address if the input is already an IP literal.
pub fn parse_ip_literal(input: &str) -> Option<IpAddr> {
    input.parse::<IpAddr>().ok()
}
