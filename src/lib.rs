//! Beatmap sampler randomly samples ranked beatmap sets from the osu! API and
//! downloads them in parallel.
//!
//! A run has two phases:
//!
//! 1. The [`Collector`] queries the catalog with random "since" cursors,
//!    filters the results by star rating, game mode and approval status, and
//!    accumulates unique sets that are not already on disk.
//! 2. The [`Dispatcher`] deals the collected sets round-robin to a number of
//!    workers, each driving its own [`BeatmapDownloader`], and logs their
//!    progress.
//!
//! # Module Organization
//!
//! - [`catalog`] - Catalog items, date cursors and the HTTP catalog client
//! - [`collector`] - The sampling loop, its filter and collected entries
//! - [`dispatcher`] - Round-robin partitioning, workers and progress reporting
//! - [`transfer`] - The archive downloader used by each worker
//! - [`library`] - On-disk archive lookups
//! - [`http`] - Shared HTTP client with tracing and retries
//! - [`config`], [`cli`], [`logging`] - Configuration, arguments and logging
//! - [`app`] - The complete run
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod app;
pub mod catalog;
pub mod cli;
pub mod collector;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod library;
pub mod logging;
pub mod transfer;

pub use app::{run, run_pipeline, RunOutcome};
pub use catalog::{Catalog, CatalogItem, OsuCatalog, SinceCursor};
pub use collector::{CollectedEntry, Collection, Collector, Filter};
pub use config::Config;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use error::{Error, Result};
pub use library::{Library, SongsFolder};
pub use transfer::{BeatmapDownloader, DownloadEntry, DownloaderBuilder, Transfer};
