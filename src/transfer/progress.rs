//! Live counters of a running downloader.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Point-in-time view of a downloader's progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Entries requested so far.
    pub total: usize,
    /// Entries processed, whatever their outcome.
    pub finished: usize,
}

impl ProgressSnapshot {
    pub fn new(total: usize, finished: usize) -> Self {
        Self { total, finished }
    }

    /// Completion percentage, `None` while nothing was requested.
    pub fn percent(&self) -> Option<f64> {
        (self.total > 0).then(|| self.finished as f64 / self.total as f64 * 100.0)
    }
}

/// Shared progress state, written by `download_all` and read by pollers.
#[derive(Debug, Default)]
pub(crate) struct ProgressState {
    total: AtomicUsize,
    finished: AtomicUsize,
    current: Mutex<Option<String>>,
}

impl ProgressState {
    pub(crate) fn add_total(&self, count: usize) {
        self.total.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn finish_one(&self) {
        self.finished.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn set_current(&self, file: Option<String>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = file;
    }

    pub(crate) fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total.load(Ordering::Relaxed),
            finished: self.finished.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(ProgressSnapshot::new(0, 0).percent(), None);
        assert_eq!(ProgressSnapshot::new(4, 1).percent(), Some(25.0));
        assert_eq!(ProgressSnapshot::new(3, 3).percent(), Some(100.0));
    }

    #[test]
    fn test_state_counters() {
        let state = ProgressState::default();
        state.add_total(3);
        state.finish_one();
        state.set_current(Some("1.osz".into()));

        assert_eq!(state.snapshot(), ProgressSnapshot::new(3, 1));
        assert_eq!(state.current().as_deref(), Some("1.osz"));

        state.set_current(None);
        assert_eq!(state.current(), None);
    }
}
