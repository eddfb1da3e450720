//! Resolution and verification pipeline.
//!
//! Pass 1 runs the resolution pool straight into a verification pool. If the
//! first pass leaves a small, non-empty set of HTTP failures, exactly those
//! targets get one more verification pass with their pass-1 addresses. DNS
//! failures are never re-checked.

mod resolution;
mod verification;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use log::{error, info, warn};
use tokio::sync::{mpsc, Mutex};

use crate::app::CheckReport;
use crate::check::Verify;
use crate::config::{Config, DEFAULT_CONCURRENCY, SECOND_PASS_THRESHOLD};
use crate::dns::Resolve;
use crate::domain::{dedup_domains, DomainTarget};

use resolution::spawn_resolution_pool;
use verification::{join_verification_pool, spawn_verification_pool, PassFailures};

/// Returns true when a first pass with `failures` HTTP failures earns a second pass.
pub fn needs_second_pass(failures: usize, threshold: usize) -> bool {
    failures != 0 && failures <= threshold
}

/// Wires the worker pools together and applies the second-pass policy.
///
/// Holds only shared, read-only collaborators; one `Pipeline` can run any
/// number of batches.
pub struct Pipeline {
    resolver: Arc<dyn Resolve>,
    checker: Arc<dyn Verify>,
    concurrency: usize,
    second_pass_threshold: usize,
}

impl Pipeline {
    pub fn new(resolver: Arc<dyn Resolve>, checker: Arc<dyn Verify>) -> Self {
        Self {
            resolver,
            checker,
            concurrency: DEFAULT_CONCURRENCY,
            second_pass_threshold: SECOND_PASS_THRESHOLD,
        }
    }

    /// Builds a pipeline with the concurrency and threshold from `config`.
    pub fn from_config(
        resolver: Arc<dyn Resolve>,
        checker: Arc<dyn Verify>,
        config: &Config,
    ) -> Self {
        Self::new(resolver, checker)
            .with_concurrency(config.concurrency)
            .with_second_pass_threshold(config.second_pass_threshold)
    }

    /// Worker count per pool; zero is raised to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_second_pass_threshold(mut self, threshold: usize) -> Self {
        self.second_pass_threshold = threshold;
        self
    }

    /// Checks every domain and returns the reconciled failure sets.
    ///
    /// Duplicate inputs are removed first (exact, order-preserving). Each
    /// remaining name ends up passed, in `dns_failures`, or in
    /// `http_failures`, never in more than one. Failures are listed in input
    /// order.
    pub async fn run<S: AsRef<str>>(&self, domains: &[S]) -> CheckReport {
        let start = Instant::now();
        let domains = dedup_domains(domains);
        info!(
            "Checking {} domain(s) with {} worker(s) per pool",
            domains.len(),
            self.concurrency
        );

        let first = self.first_pass(&domains).await;
        let mut dns_failures = first.dns;
        let mut http_failures = first.http;
        info!(
            "First pass: {} DNS failure(s), {} HTTP failure(s)",
            dns_failures.len(),
            http_failures.len()
        );

        let second_pass_ran = needs_second_pass(http_failures.len(), self.second_pass_threshold);
        if second_pass_ran {
            let second = self.verification_pass(http_failures).await;
            dns_failures.extend(second.dns);
            http_failures = second.http;
            info!("Second pass: {} HTTP failure(s) remain", http_failures.len());
        } else if !http_failures.is_empty() {
            info!(
                "Skipping second pass: {} failures exceed threshold {}",
                http_failures.len(),
                self.second_pass_threshold
            );
        }

        sort_by_input_order(&domains, &mut dns_failures, &mut http_failures);

        CheckReport {
            total: domains.len(),
            dns_failures,
            http_failures,
            second_pass_ran,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        }
    }

    /// Resolution pool feeding the first verification pool directly.
    async fn first_pass(&self, domains: &[String]) -> PassFailures {
        let (task_tx, task_rx) = mpsc::channel::<String>(self.concurrency);
        let (target_tx, target_rx) = mpsc::channel::<DomainTarget>(self.concurrency);

        let resolvers = spawn_resolution_pool(
            Arc::clone(&self.resolver),
            Arc::new(Mutex::new(task_rx)),
            target_tx,
            self.concurrency,
        );
        let verifiers = spawn_verification_pool(
            Arc::clone(&self.checker),
            Arc::new(Mutex::new(target_rx)),
            self.concurrency,
        );

        for name in domains {
            if task_tx.send(name.clone()).await.is_err() {
                warn!("Resolution workers are gone; {} and later domains were not queued", name);
                break;
            }
        }
        drop(task_tx);

        for result in join_all(resolvers).await {
            if let Err(e) = result {
                error!("Resolution worker terminated abnormally: {}", e);
            }
        }
        join_verification_pool(verifiers).await
    }

    /// One verification pass over an already-resolved set of targets.
    async fn verification_pass(&self, targets: Vec<DomainTarget>) -> PassFailures {
        let (tx, rx) = mpsc::channel::<DomainTarget>(targets.len().max(1));
        let workers = spawn_verification_pool(
            Arc::clone(&self.checker),
            Arc::new(Mutex::new(rx)),
            self.concurrency,
        );

        for mut target in targets {
            target.response_body = None;
            if tx.send(target).await.is_err() {
                warn!("Verification workers are gone before the second pass was queued");
                break;
            }
        }
        drop(tx);

        join_verification_pool(workers).await
    }
}

fn sort_by_input_order(
    domains: &[String],
    dns_failures: &mut [String],
    http_failures: &mut [DomainTarget],
) {
    let position: HashMap<&str, usize> = domains
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();
    let rank = |name: &str| position.get(name).copied().unwrap_or(usize::MAX);
    dns_failures.sort_by_key(|name| rank(name));
    http_failures.sort_by_key(|target| rank(&target.name));
}
