//! The collection loop.
//!
//! Each attempt draws a handful of random cursors, concatenates whatever the
//! catalog returns for them, shuffles the batch, and fills the collection
//! with matching sets that are neither already collected nor already on disk.
//! The loop runs until the target is met, or until `max_attempts` when one is
//! configured.

use super::entry::CollectedEntry;
use super::filter::{shuffle, Filter};
use crate::catalog::{random_since, Catalog, CatalogItem, SinceCursor, YearMonth};
use crate::error::{Error, Result};
use crate::library::Library;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Number of random cursors queried per attempt.
pub const DEFAULT_CURSORS_PER_ATTEMPT: usize = 5;

/// Tuning of the collection loop.
#[derive(Debug, Clone)]
pub struct CollectorOptions {
    /// Cursors queried per attempt.
    pub cursors_per_attempt: usize,
    /// Earliest month a cursor can point to.
    pub epoch: YearMonth,
    /// Latest month a cursor can point to. `None` means the current month.
    pub until: Option<YearMonth>,
    /// Stop after this many attempts. `None` retries until the target is met.
    pub max_attempts: Option<u64>,
    /// Pause between two attempts.
    pub retry_delay: Duration,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            cursors_per_attempt: DEFAULT_CURSORS_PER_ATTEMPT,
            epoch: YearMonth::new(2010, 1),
            until: None,
            max_attempts: None,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Result of a collection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    entries: Vec<CollectedEntry>,
    attempts: u64,
}

impl Collection {
    /// Collected entries, in the order they were accepted.
    pub fn entries(&self) -> &[CollectedEntry] {
        &self.entries
    }

    /// Number of attempts it took.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CollectedEntry> {
        self.entries
    }
}

/// Entries keyed by set id; the first occurrence of an id wins.
#[derive(Default)]
struct Accumulator {
    seen: HashSet<u64>,
    entries: Vec<CollectedEntry>,
}

impl Accumulator {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, item: &CatalogItem) -> bool {
        if !self.seen.insert(item.set_id) {
            return false;
        }
        self.entries.push(CollectedEntry::from(item));
        true
    }
}

/// What one batch contributed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BatchOutcome {
    matched: usize,
    added: usize,
    existing: usize,
}

/// Samples the catalog until enough unique sets are gathered.
pub struct Collector<C, L> {
    catalog: C,
    library: L,
    filter: Filter,
    options: CollectorOptions,
    rng: StdRng,
}

impl<C: Catalog, L: Library> Collector<C, L> {
    /// Creates a collector with default options and an OS-seeded RNG.
    pub fn new(catalog: C, library: L, filter: Filter) -> Self {
        Self {
            catalog,
            library,
            filter,
            options: CollectorOptions::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the loop options.
    pub fn options(mut self, options: CollectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Make cursor sampling and shuffling deterministic.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Collect up to `target` unique entries.
    ///
    /// A target of zero returns immediately. Failed attempts are logged and
    /// retried; without `max_attempts` a catalog that never yields matches
    /// keeps this future pending forever.
    pub async fn collect(&mut self, target: usize) -> Collection {
        let mut collected = Accumulator::default();
        let mut attempts: u64 = 0;

        while collected.len() < target {
            if let Some(max) = self.options.max_attempts {
                if attempts >= max {
                    warn!(
                        "Giving up after {} attempts with {}/{} beatmap sets collected.",
                        attempts,
                        collected.len(),
                        target
                    );
                    break;
                }
            }
            if attempts > 0 && !self.options.retry_delay.is_zero() {
                tokio::time::sleep(self.options.retry_delay).await;
            }
            attempts += 1;

            let batch = match self.attempt(attempts).await {
                Ok(batch) => batch,
                Err(e) => {
                    error!("Error fetching beatmaps: {}", e.describe());
                    continue;
                }
            };

            let outcome = self.absorb(&batch, &mut collected, target);
            debug!(
                "Attempt {}: {} items, {} matched, {} added, {} already on disk",
                attempts,
                batch.len(),
                outcome.matched,
                outcome.added,
                outcome.existing
            );
            info!(
                "Attempt {}: Collected {}/{} unique beatmap set IDs (excluding already existing).",
                attempts,
                collected.len(),
                target
            );
            if outcome.matched == 0 {
                info!("No beatmaps found in this batch, trying again...");
            }
        }

        Collection {
            entries: collected.entries,
            attempts,
        }
    }

    /// Query every cursor of one attempt and return the shuffled batch.
    ///
    /// A failing cursor is skipped. The attempt fails only when all of them do.
    async fn attempt(&mut self, attempt: u64) -> Result<Vec<CatalogItem>> {
        let until = self.options.until.unwrap_or_else(YearMonth::current);
        let cursors: Vec<SinceCursor> = (0..self.options.cursors_per_attempt.max(1))
            .map(|_| random_since(&mut self.rng, self.options.epoch, until))
            .collect();

        let mut batch = Vec::new();
        let mut failures = 0;
        for cursor in &cursors {
            match self.catalog.fetch_since(cursor).await {
                Ok(items) => batch.extend(items),
                Err(e) => {
                    failures += 1;
                    warn!("Catalog query since {} failed: {}", cursor, e.describe());
                }
            }
        }

        if failures == cursors.len() {
            return Err(Error::AttemptFailed {
                attempt,
                cursors: cursors.len(),
            });
        }

        shuffle(&mut batch, &mut self.rng);
        Ok(batch)
    }

    fn absorb(
        &self,
        batch: &[CatalogItem],
        collected: &mut Accumulator,
        target: usize,
    ) -> BatchOutcome {
        let matching: Vec<&CatalogItem> = self.filter.apply(batch).collect();
        let mut outcome = BatchOutcome {
            matched: matching.len(),
            ..BatchOutcome::default()
        };

        for item in matching {
            if collected.len() >= target {
                break;
            }
            if collected.seen.contains(&item.set_id) {
                continue;
            }
            if self.library.contains(item.set_id) {
                info!("Skipping already existing beatmapset: {}", item.set_id);
                outcome.existing += 1;
                continue;
            }
            if collected.insert(item) {
                outcome.added += 1;
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct NoCatalog;

    impl Catalog for NoCatalog {
        async fn fetch_since(&self, _since: &SinceCursor) -> Result<Vec<CatalogItem>> {
            Ok(Vec::new())
        }
    }

    struct OnDisk(Vec<u64>);

    impl Library for OnDisk {
        fn archive_path(&self, set_id: u64) -> PathBuf {
            PathBuf::from(format!("{}.osz", set_id))
        }

        fn contains(&self, set_id: u64) -> bool {
            self.0.contains(&set_id)
        }
    }

    fn item(set_id: u64) -> CatalogItem {
        CatalogItem {
            set_id,
            beatmap_id: None,
            difficulty_rating: 5.0,
            mode: 0,
            approved: 1,
            artist: "a".into(),
            title: format!("t{}", set_id),
            version: None,
        }
    }

    #[test]
    fn test_absorb_skips_duplicates_and_existing() {
        let collector = Collector::new(NoCatalog, OnDisk(vec![3]), Filter::new(0.0, 10.0, 0));
        let mut acc = Accumulator::default();
        let batch = vec![item(1), item(1), item(3), item(2)];

        let outcome = collector.absorb(&batch, &mut acc, 10);

        assert_eq!(outcome, BatchOutcome { matched: 4, added: 2, existing: 1 });
        let ids: Vec<u64> = acc.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_absorb_stops_at_target() {
        let collector = Collector::new(NoCatalog, OnDisk(vec![]), Filter::new(0.0, 10.0, 0));
        let mut acc = Accumulator::default();
        let batch: Vec<CatalogItem> = (1..=10).map(item).collect();

        let outcome = collector.absorb(&batch, &mut acc, 4);

        assert_eq!(outcome.added, 4);
        assert_eq!(acc.len(), 4);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut acc = Accumulator::default();
        let mut renamed = item(8);
        renamed.title = "other".into();

        assert!(acc.insert(&item(8)));
        assert!(!acc.insert(&renamed));
        assert_eq!(acc.entries[0].name, "a - t8");
    }

    #[tokio::test]
    async fn test_zero_target_makes_no_attempt() {
        let mut collector = Collector::new(NoCatalog, OnDisk(vec![]), Filter::new(0.0, 10.0, 0));
        let collection = collector.collect(0).await;
        assert!(collection.is_empty());
        assert_eq!(collection.attempts(), 0);
    }

    #[tokio::test]
    async fn test_max_attempts_bounds_the_loop() {
        let options = CollectorOptions {
            max_attempts: Some(3),
            ..CollectorOptions::default()
        };
        let mut collector = Collector::new(NoCatalog, OnDisk(vec![]), Filter::new(0.0, 10.0, 0))
            .options(options)
            .seed(5);
        let collection = collector.collect(2).await;
        assert!(collection.is_empty());
        assert_eq!(collection.attempts(), 3);
    }
}
