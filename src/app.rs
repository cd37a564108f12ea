//! The whole run: collect, then dispatch.

use crate::catalog::{Catalog, OsuCatalog};
use crate::collector::Collector;
use crate::config::Config;
use crate::dispatcher::{DispatchReport, Dispatcher};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};
use crate::library::{Library, SongsFolder};
use crate::transfer::Transfer;

use tracing::{info, warn};

/// Exit status after a dispatch.
pub const EXIT_OK: u8 = 0;
/// Exit status when nothing matched the criteria.
pub const EXIT_NOTHING_COLLECTED: u8 = 1;
/// Exit status for configuration and startup errors.
pub const EXIT_SETUP_FAILED: u8 = 2;

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Collection came back empty; nothing was dispatched.
    NothingCollected,
    /// Entries were dispatched to the workers.
    Dispatched(DispatchReport),
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::NothingCollected => EXIT_NOTHING_COLLECTED,
            RunOutcome::Dispatched(_) => EXIT_OK,
        }
    }
}

/// Collect up to `target` entries and dispatch them over `workers` workers.
///
/// The dispatcher is not touched when the collection is empty.
pub async fn run_pipeline<C, L, F, T, D>(
    collector: &mut Collector<C, L>,
    dispatcher: &Dispatcher<F, D>,
    target: usize,
    workers: usize,
) -> RunOutcome
where
    C: Catalog,
    L: Library,
    F: Fn(usize) -> T,
    T: Transfer,
    D: Library,
{
    let collection = collector.collect(target).await;
    if collection.is_empty() {
        info!("No beatmaps found matching criteria.");
        return RunOutcome::NothingCollected;
    }
    info!(
        "Collected {} beatmap sets in {} attempts.",
        collection.len(),
        collection.attempts()
    );

    let report = dispatcher.dispatch(collection.into_entries(), workers).await;

    let missing = report.missing();
    if !missing.is_empty() {
        warn!(
            "{} of {} requested archives are missing on disk.",
            missing.len(),
            report.requested()
        );
    }
    if report.failed_workers() > 0 {
        warn!("{} downloaders failed.", report.failed_workers());
    }

    RunOutcome::Dispatched(report)
}

/// Run against the real catalog and mirror described by `config`.
pub async fn run(config: &Config, seed: Option<u64>) -> Result<RunOutcome> {
    let client = create_http_client(HttpClientConfig {
        retries: config.retries,
        ..HttpClientConfig::default()
    })?;
    let catalog = OsuCatalog::new(client, &config.catalog_endpoint, config.api_key.clone())?;
    let library = SongsFolder::new(&config.songs_folder);

    let mut collector = Collector::new(catalog, library.clone(), config.filter())
        .options(config.collector_options());
    if let Some(seed) = seed {
        collector = collector.seed(seed);
    }

    let dispatcher = Dispatcher::new(|_: usize| config.downloader().build(), library);

    Ok(run_pipeline(&mut collector, &dispatcher, config.target_count, config.workers).await)
}
