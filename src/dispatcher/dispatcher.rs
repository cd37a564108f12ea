//! Fan-out of the download phase.

use super::partition::round_robin;
use super::worker::{run_worker, WorkerReport};
use crate::collector::CollectedEntry;
use crate::library::Library;
use crate::transfer::Transfer;

use futures::future::join_all;
use std::time::Duration;
use tracing::info;

/// How often a worker polls its transfer for progress.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of a whole dispatch.
#[derive(Debug, Default)]
pub struct DispatchReport {
    workers: Vec<WorkerReport>,
}

impl DispatchReport {
    /// Per-worker reports, in worker order.
    pub fn workers(&self) -> &[WorkerReport] {
        &self.workers
    }

    /// Entries handed to workers.
    pub fn requested(&self) -> usize {
        self.workers.iter().map(|w| w.entries.len()).sum()
    }

    /// Set ids missing on disk after their worker settled.
    pub fn missing(&self) -> Vec<u64> {
        self.workers
            .iter()
            .flat_map(|w| w.missing.iter().copied())
            .collect()
    }

    /// Workers whose batch could not run at all.
    pub fn failed_workers(&self) -> usize {
        self.workers.iter().filter(|w| !w.completed()).count()
    }
}

/// Splits entries across workers and runs them concurrently.
///
/// `factory` is called once per non-empty bucket with the 1-based worker index
/// and must return a fresh transfer; workers never share one.
pub struct Dispatcher<F, L> {
    factory: F,
    library: L,
    poll_interval: Duration,
}

impl<F, T, L> Dispatcher<F, L>
where
    F: Fn(usize) -> T,
    T: Transfer,
    L: Library,
{
    pub fn new(factory: F, library: L) -> Self {
        Self {
            factory,
            library,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Change how often workers poll their progress.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Download `entries` with up to `workers` concurrent workers.
    ///
    /// Resolves once every worker settled, successfully or not.
    pub async fn dispatch(&self, entries: Vec<CollectedEntry>, workers: usize) -> DispatchReport {
        let buckets = round_robin(entries, workers);
        info!("Starting {} parallel downloaders...", buckets.len());

        let runs = buckets.into_iter().enumerate().map(|(idx, bucket)| {
            let index = idx + 1;
            let transfer = (self.factory)(index);
            run_worker(index, bucket, transfer, &self.library, self.poll_interval)
        });
        let workers = join_all(runs).await;

        info!("All downloads finished.");
        DispatchReport { workers }
    }
}
