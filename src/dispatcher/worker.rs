//! One download worker.

use super::reporter::ProgressReporter;
use crate::collector::CollectedEntry;
use crate::error::Result;
use crate::library::Library;
use crate::transfer::{DownloadEntry, Status, Summary, Transfer};

use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// What a worker did.
#[derive(Debug)]
pub struct WorkerReport {
    /// 1-based worker index.
    pub index: usize,
    /// Entries assigned to the worker.
    pub entries: Vec<CollectedEntry>,
    /// Wall time from submission to settlement.
    pub elapsed: Duration,
    /// Per-file summaries, or why the batch could not run.
    pub outcome: Result<Vec<Summary>>,
    /// Set ids whose archive is not on disk after the worker settled.
    pub missing: Vec<u64>,
}

impl WorkerReport {
    /// Whether `download_all` itself completed.
    pub fn completed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Files reported as failed by the transfer.
    pub fn failed_files(&self) -> usize {
        match self.outcome {
            Ok(ref summaries) => summaries
                .iter()
                .filter(|s| matches!(s.status(), Status::Fail(_)))
                .count(),
            Err(_) => 0,
        }
    }
}

/// Run one worker to settlement.
///
/// The progress poll lives exactly as long as the `download_all` future: it is
/// dropped with the loop below, whatever the outcome.
pub(crate) async fn run_worker<T, L>(
    index: usize,
    entries: Vec<CollectedEntry>,
    transfer: T,
    library: &L,
    poll_interval: Duration,
) -> WorkerReport
where
    T: Transfer,
    L: Library,
{
    let start = Instant::now();
    let mut reporter = ProgressReporter::new(index);

    transfer.add_entries(entries.iter().map(DownloadEntry::from).collect());

    let outcome = {
        let download = transfer.download_all();
        tokio::pin!(download);

        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = ticker.tick() => {
                    let lines =
                        reporter.observe(&entries, transfer.progress(), transfer.current_file());
                    for line in lines {
                        info!("{}", line);
                    }
                }
                outcome = &mut download => break outcome,
            }
        }
    };

    match outcome {
        Ok(ref summaries) => {
            for summary in summaries {
                if let Status::Fail(ref reason) = summary.status() {
                    warn!(
                        "{} Failed to download {}: {}",
                        reporter.label(),
                        summary.entry().filename(),
                        reason
                    );
                }
            }
        }
        Err(ref e) => error!("{} Download failed: {}", reporter.label(), e.describe()),
    }

    let missing: Vec<u64> = entries
        .iter()
        .filter(|entry| !library.contains(entry.id))
        .map(|entry| {
            warn!(
                "{} .osz file does not exist: {}",
                reporter.label(),
                library.archive_path(entry.id).display()
            );
            entry.id
        })
        .collect();

    let elapsed = start.elapsed();
    info!("{}", reporter.finished(&entries, elapsed));

    WorkerReport {
        index,
        entries,
        elapsed,
        outcome,
        missing,
    }
}
