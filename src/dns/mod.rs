//! DNS resolution.
//!
//! This module provides a small stub resolver built on `hickory-proto` wire
//! messages:
//! - One A question per attempt, recursion desired
//! - One randomly chosen server per attempt
//! - Bounded retry on timeout, SERVFAIL and REFUSED
//!
//! The transport sits behind `DnsExchange` so retry behavior can be tested
//! without a network.

mod exchange;
mod resolver;

// Re-export public API
pub use exchange::{DnsExchange, UdpExchange};
pub use resolver::{DnsResolver, Resolve, ResolverConfig};
