//! Core downloader implementation with fetch logic.
//!
//! A [`BeatmapDownloader`] owns a queue of [`DownloadEntry`] requests. Calling
//! [`Transfer::download_all`] drains the queue and fetches the files one after
//! the other, optionally paced by `files_per_second`. Each file is streamed to
//! a `.part` file that is renamed once complete, so an interrupted transfer
//! never leaves a truncated archive under its final name.

use super::config::DownloaderConfig;
use super::entry::DownloadEntry;
use super::progress::{ProgressSnapshot, ProgressState};
use super::summary::{Status, Summary};
use super::Transfer;
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};

use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Represents the download controller.
///
/// ```rust
/// use beatmap_sampler::transfer::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// ```
pub struct BeatmapDownloader {
    config: DownloaderConfig,
    queue: Mutex<Vec<DownloadEntry>>,
    state: ProgressState,
}

impl fmt::Debug for BeatmapDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeatmapDownloader")
            .field("config", &self.config)
            .field("progress", &self.state.snapshot())
            .finish()
    }
}

impl BeatmapDownloader {
    /// Creates a new downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self {
            config,
            queue: Mutex::new(Vec::new()),
            state: ProgressState::default(),
        }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of retries per download.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the per-second start cap, 0 meaning unlimited.
    pub fn files_per_second(&self) -> u32 {
        self.config.files_per_second
    }

    /// Gets the set archive URL template.
    pub fn set_url(&self) -> &str {
        &self.config.set_url
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets whether to overwrite existing files.
    pub fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// Number of entries waiting for the next `download_all`.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn take_pending(&self) -> Vec<DownloadEntry> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Fetches one file and writes it to disk.
    async fn fetch(&self, client: &ClientWithMiddleware, entry: &DownloadEntry) -> Summary {
        let filename = entry.filename();
        let output = self.config.directory.join(&filename);
        let summary = Summary::new(entry.clone(), StatusCode::BAD_REQUEST, 0);

        // Nothing is in flight until the request is sent.
        self.state.set_current(None);

        if !self.config.overwrite && output.is_file() {
            let size = fs::metadata(&output).await.map(|m| m.len()).unwrap_or(0);
            return Summary::new(entry.clone(), StatusCode::OK, size).skip("File already exists");
        }

        let url = match entry.url(&self.config) {
            Ok(url) => url,
            Err(e) => return summary.fail(e),
        };

        self.state.set_current(Some(filename.clone()));

        debug!("Fetching {}", url);
        let mut req = client.get(url.as_str());
        if let Some(ref h) = self.config.headers {
            req = req.headers(h.to_owned());
        }

        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => return summary.fail(e),
        };

        if let Err(e) = res.error_for_status_ref() {
            return Summary::new(entry.clone(), res.status(), 0).fail(e);
        }
        let status = res.status();

        let partial = self.config.directory.join(format!("{}.part", filename));
        debug!("Creating destination file {:?}", &partial);
        let mut file = match fs::File::create(&partial).await {
            Ok(file) => file,
            Err(e) => return summary.fail(e),
        };

        let mut size: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    discard(&partial).await;
                    return summary.fail(e);
                }
            };
            size += chunk.len() as u64;

            if let Err(e) = file.write_all_buf(&mut chunk).await {
                discard(&partial).await;
                return summary.fail(e);
            }
        }

        if let Err(e) = file.flush().await {
            discard(&partial).await;
            return summary.fail(e);
        }
        drop(file);

        if let Err(e) = fs::rename(&partial, &output).await {
            discard(&partial).await;
            return summary.fail(e);
        }

        debug!("Saved {} ({} bytes)", filename, size);
        Summary::new(entry.clone(), status, size).with_status(Status::Success)
    }
}

async fn discard(partial: &Path) {
    if let Err(e) = fs::remove_file(partial).await {
        debug!("Cannot remove {:?}: {}", partial, e);
    }
}

impl Transfer for BeatmapDownloader {
    fn add_entries(&self, entries: Vec<DownloadEntry>) {
        self.state.add_total(entries.len());
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(entries);
    }

    async fn download_all(&self) -> Result<Vec<Summary>> {
        let pending = self.take_pending();
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.config.directory).await?;

        let client = create_http_client(HttpClientConfig {
            retries: self.config.retries,
            headers: self.config.headers.clone(),
            ..HttpClientConfig::default()
        })?;

        let mut pacing = (self.config.files_per_second > 0).then(|| {
            let period = Duration::from_secs_f64(1.0 / f64::from(self.config.files_per_second));
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        let mut summaries = Vec::with_capacity(pending.len());
        for entry in &pending {
            if let Some(ticker) = pacing.as_mut() {
                ticker.tick().await;
            }
            let summary = self.fetch(&client, entry).await;
            if let Status::Fail(ref reason) = summary.status() {
                debug!("{} failed: {}", entry.filename(), reason);
            }
            self.state.finish_one();
            summaries.push(summary);
        }
        self.state.set_current(None);

        Ok(summaries)
    }

    fn progress(&self) -> ProgressSnapshot {
        self.state.snapshot()
    }

    fn current_file(&self) -> Option<String> {
        self.state.current()
    }
}
