//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, defaults, protocol limits)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{normalize_health_path, split_server_list, Config, LogFormat, LogLevel, Opt};
