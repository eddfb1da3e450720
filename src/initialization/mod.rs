//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client (timeouts, redirect and keep-alive policy)
//! - DNS resolver (explicit servers or resolv.conf)
//!
//! All initialization functions return `InitializationError` on failure; the
//! binary treats any of them as fatal.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::{build_client, init_client};
pub use logger::init_logger_with;
pub use resolver::{init_resolver, parse_server_list, read_resolv_conf};
