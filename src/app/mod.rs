//! Main application modules.
//!
//! This module provides the final report type and how it is rendered for
//! monitoring systems (summary line and exit status).

pub mod report;

// Re-export public API
pub use report::{CheckReport, EXIT_CRITICAL, EXIT_OK};
