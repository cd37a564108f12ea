//! Progress log lines of a worker.
//!
//! The reporter is a pure state machine: the worker feeds it a snapshot on
//! every poll and logs whatever lines it returns. Nothing is returned when
//! neither the counters nor the file in flight changed since the last poll.

use crate::collector::CollectedEntry;
use crate::transfer::ProgressSnapshot;

use std::time::Duration;

/// Entries listed by [`preview`] before the remainder is summarized.
pub const PREVIEW_LIMIT: usize = 3;

/// `"id - name; id - name; id - name ...and N more"`.
pub fn preview(entries: &[CollectedEntry]) -> String {
    let listed = entries
        .iter()
        .take(PREVIEW_LIMIT)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    match entries.len().checked_sub(PREVIEW_LIMIT) {
        Some(more) if more > 0 => format!("{} ...and {} more", listed, more),
        _ => listed,
    }
}

/// Turns successive progress snapshots into de-duplicated log lines.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    label: String,
    started: bool,
    last_progress: Option<String>,
    last_file: Option<String>,
}

impl ProgressReporter {
    /// Creates a reporter for the 1-based worker `index`.
    pub fn new(index: usize) -> Self {
        Self {
            label: format!("[Downloader {}]", index),
            started: false,
            last_progress: None,
            last_file: None,
        }
    }

    /// Prefix of every line, `[Downloader N]`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lines to log for this poll.
    ///
    /// The first poll announces the batch. Progress lines only appear once
    /// something was requested.
    pub fn observe(
        &mut self,
        entries: &[CollectedEntry],
        snapshot: ProgressSnapshot,
        current_file: Option<String>,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.started {
            self.started = true;
            match entries {
                [] => {}
                [only] => lines.push(format!("{} Starting to download: {}", self.label, only)),
                _ => lines.push(format!(
                    "{} Starting to download {}: {}",
                    self.label,
                    entries.len(),
                    preview(entries)
                )),
            }
        }

        if let Some(percent) = snapshot.percent() {
            let progress = format!("{}/{} ({:.2}%)", snapshot.finished, snapshot.total, percent);
            if self.last_progress.as_deref() != Some(progress.as_str())
                || self.last_file != current_file
            {
                lines.push(format!(
                    "{} {} - Currently downloading file: {}",
                    self.label,
                    progress,
                    current_file.as_deref().unwrap_or("none")
                ));
                self.last_progress = Some(progress);
                self.last_file = current_file;
            }
        }

        lines
    }

    /// Summary line once the worker settled.
    pub fn finished(&self, entries: &[CollectedEntry], elapsed: Duration) -> String {
        let taken = format!("Time taken: {:.2} seconds.", elapsed.as_secs_f64());
        match entries {
            [] => format!("{} Finished: 0 sets. {}", self.label, taken),
            [only] => format!("{} Finished: {}. {}", self.label, only, taken),
            _ => format!("{} Finished: {}. {}", self.label, preview(entries), taken),
        }
    }
}
