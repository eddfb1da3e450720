//! Verification worker pool.
//!
//! Each worker keeps its own failure lists and hands them back through its
//! join handle, so a pass's results only exist once its workers are done.

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::check::Verify;
use crate::domain::DomainTarget;

/// Failures collected during one verification pass.
#[derive(Debug, Default)]
pub(crate) struct PassFailures {
    /// Names that reached verification without an address
    pub dns: Vec<String>,
    /// Targets whose HTTP check failed
    pub http: Vec<DomainTarget>,
}

impl PassFailures {
    fn absorb(&mut self, other: PassFailures) {
        self.dns.extend(other.dns);
        self.http.extend(other.http);
    }
}

/// Spawns `workers` verification workers over `source`.
pub(crate) fn spawn_verification_pool(
    checker: Arc<dyn Verify>,
    source: Arc<Mutex<mpsc::Receiver<DomainTarget>>>,
    workers: usize,
) -> Vec<JoinHandle<PassFailures>> {
    (0..workers)
        .map(|id| {
            let checker = Arc::clone(&checker);
            let source = Arc::clone(&source);
            tokio::spawn(verification_worker(id, checker, source))
        })
        .collect()
}

async fn verification_worker(
    id: usize,
    checker: Arc<dyn Verify>,
    source: Arc<Mutex<mpsc::Receiver<DomainTarget>>>,
) -> PassFailures {
    let mut failures = PassFailures::default();
    loop {
        let next = source.lock().await.recv().await;
        let Some(mut target) = next else {
            break;
        };

        if !target.is_resolved() {
            debug!(
                "{} classified as DNS failure ({})",
                target.name,
                target.resolution_error.as_deref().unwrap_or("unknown reason")
            );
            failures.dns.push(target.name);
            continue;
        }

        match checker.verify(&mut target).await {
            Ok(()) => debug!("{} passed", target.name),
            Err(e) => {
                debug!("{} failed HTTP check: {}", target.name, e);
                failures.http.push(target);
            }
        }
    }
    debug!("Verification worker {} finished", id);
    failures
}

/// Waits for every worker of a pass and merges their failures.
///
/// A worker that panicked is logged; whatever it had collected is lost.
pub(crate) async fn join_verification_pool(
    handles: Vec<JoinHandle<PassFailures>>,
) -> PassFailures {
    let mut merged = PassFailures::default();
    for result in join_all(handles).await {
        match result {
            Ok(failures) => merged.absorb(failures),
            Err(e) => error!("Verification worker terminated abnormally: {}", e),
        }
    }
    merged
}
