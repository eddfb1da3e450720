//! Resolution worker pool.
//!
//! Workers share one task receiver and push every produced `DomainTarget`
//! onto the channel feeding the verification pool.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::dns::Resolve;
use crate::domain::{parse_ip_literal, DomainTarget};

/// Spawns `workers` resolution workers.
///
/// The pool is done once every returned handle has completed, which happens
/// after the task channel is closed and drained. Each worker owns a clone of
/// `results`, so the verification side sees the channel close exactly then.
pub(crate) fn spawn_resolution_pool(
    resolver: Arc<dyn Resolve>,
    tasks: Arc<Mutex<mpsc::Receiver<String>>>,
    results: mpsc::Sender<DomainTarget>,
    workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..workers)
        .map(|id| {
            let resolver = Arc::clone(&resolver);
            let tasks = Arc::clone(&tasks);
            let results = results.clone();
            tokio::spawn(resolution_worker(id, resolver, tasks, results))
        })
        .collect()
}

async fn resolution_worker(
    id: usize,
    resolver: Arc<dyn Resolve>,
    tasks: Arc<Mutex<mpsc::Receiver<String>>>,
    results: mpsc::Sender<DomainTarget>,
) {
    loop {
        let next = tasks.lock().await.recv().await;
        let Some(name) = next else {
            break;
        };

        let target = resolve_target(resolver.as_ref(), name).await;
        if let Err(e) = results.send(target).await {
            warn!(
                "Resolution worker {} could not hand off {}: verification side is gone",
                id, e.0.name
            );
            break;
        }
    }
    debug!("Resolution worker {} finished", id);
}

/// Produces the target for one input name.
///
/// IP literals never reach the resolver. On success the first address wins;
/// on failure the reason is kept only for diagnostics.
pub(crate) async fn resolve_target(resolver: &dyn Resolve, name: String) -> DomainTarget {
    if let Some(ip) = parse_ip_literal(&name) {
        return DomainTarget::resolved(name, ip);
    }

    match resolver.resolve(&name).await {
        Ok(addresses) => match addresses.first() {
            Some(&address) => {
                debug!("Resolved {} to {}", name, address);
                DomainTarget::resolved(name, address)
            }
            None => DomainTarget::unresolved(name, "no addresses returned"),
        },
        Err(e) => {
            debug!("Failed to resolve {}: {}", name, e);
            DomainTarget::unresolved(name, e.to_string())
        }
    }
}
