//! Final report and its monitoring-facing rendering.

use log::debug;

use crate::domain::DomainTarget;

/// Printed when no domain failed.
pub const SUCCESS_MESSAGE: &str = "All domains passed PHP check";
/// Prefix of the HTTP failure category.
pub const HTTP_CRITICAL_PREFIX: &str = "PHP_CRITICAL: ";
/// Prefix of the DNS failure category.
pub const DNS_CRITICAL_PREFIX: &str = "DNS_CRITICAL: ";

/// Exit status when every domain passed.
pub const EXIT_OK: i32 = 0;
/// Exit status when at least one domain failed.
pub const EXIT_CRITICAL: i32 = 2;

/// Outcome of one pipeline run.
///
/// Failures are listed in input order; a domain appears in at most one list.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Number of distinct domains checked
    pub total: usize,
    /// Domains whose DNS resolution failed
    pub dns_failures: Vec<String>,
    /// Targets whose HTTP check failed in the final pass
    pub http_failures: Vec<DomainTarget>,
    /// Whether the second verification pass ran
    pub second_pass_ran: bool,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.dns_failures.is_empty() && self.http_failures.is_empty()
    }

    pub fn http_failure_names(&self) -> Vec<&str> {
        self.http_failures.iter().map(|t| t.name.as_str()).collect()
    }

    /// `EXIT_OK` when clean, `EXIT_CRITICAL` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            EXIT_OK
        } else {
            EXIT_CRITICAL
        }
    }

    /// Renders the one-line summary monitoring systems parse.
    ///
    /// HTTP failures come first, then DNS failures; every listed domain is
    /// followed by a single space, e.g. `PHP_CRITICAL: a b DNS_CRITICAL: c `.
    pub fn summary_line(&self) -> String {
        if self.is_clean() {
            return SUCCESS_MESSAGE.to_string();
        }

        let mut line = String::new();
        if !self.http_failures.is_empty() {
            line.push_str(HTTP_CRITICAL_PREFIX);
            for target in &self.http_failures {
                line.push_str(&target.name);
                line.push(' ');
            }
        }
        if !self.dns_failures.is_empty() {
            line.push_str(DNS_CRITICAL_PREFIX);
            for name in &self.dns_failures {
                line.push_str(name);
                line.push(' ');
            }
        }
        line
    }

    /// Logs captured response bodies of failed targets at debug level.
    pub fn log_failure_bodies(&self) {
        for target in &self.http_failures {
            if let Some(body) = &target.response_body {
                debug!("Response body from {}: {}", target.name, body);
            }
        }
    }
}
