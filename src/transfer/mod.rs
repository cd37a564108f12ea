//! Transfer module: downloading beatmap archives.
//!
//! This module provides the [`BeatmapDownloader`], a queue-based downloader
//! that the dispatcher instantiates once per worker, and the [`Transfer`]
//! trait describing what the dispatcher needs from it.
//!
//! # Overview
//!
//! - `entry` - [`DownloadEntry`] requests and their [`DownloadType`]
//! - `summary` - per-file [`Summary`] and [`Status`]
//! - `progress` - live [`ProgressSnapshot`] counters
//! - `config` - [`DownloaderConfig`] and its defaults
//! - `builder` - [`DownloaderBuilder`]
//! - `downloader` - the [`BeatmapDownloader`] itself
//!
//! # Examples
//!
//! ```rust,no_run
//! use beatmap_sampler::transfer::{DownloadEntry, DownloaderBuilder, Transfer};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), beatmap_sampler::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("Songs"))
//!     .files_per_second(0)
//!     .build();
//!
//! downloader.add_entries(vec![DownloadEntry::set(39804), DownloadEntry::set(1263264)]);
//! let summaries = downloader.download_all().await?;
//! println!("{} files processed", summaries.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod entry;
pub mod progress;
pub mod summary;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DEFAULT_BEATMAP_URL, DEFAULT_SET_URL};
pub use downloader::BeatmapDownloader;
pub use entry::{DownloadEntry, DownloadType};
pub use progress::ProgressSnapshot;
pub use summary::{Status, Summary};

use crate::error::Result;
use std::future::Future;

/// A batch downloader observed while it runs.
///
/// `download_all` borrows the transfer immutably so that `progress` and
/// `current_file` can be polled while it is in flight.
pub trait Transfer {
    /// Queue a batch of requests.
    fn add_entries(&self, entries: Vec<DownloadEntry>);

    /// Download everything queued so far.
    ///
    /// Per-file failures are reported in the returned summaries. An `Err`
    /// means the batch as a whole could not run.
    fn download_all(&self) -> impl Future<Output = Result<Vec<Summary>>>;

    /// Requested and finished counters.
    fn progress(&self) -> ProgressSnapshot;

    /// Name of the file currently in flight, if any.
    fn current_file(&self) -> Option<String>;
}
