//! Builder pattern implementation for creating [`BeatmapDownloader`] instances.
//!
//! ```rust
//! use beatmap_sampler::transfer::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./Songs"))
//!     .files_per_second(2)
//!     .retries(5)
//!     .build();
//! ```

use super::config::DownloaderConfig;
use super::downloader::BeatmapDownloader;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::path::PathBuf;

/// A builder used to create a [`BeatmapDownloader`].
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of retries per download.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Cap how many files are started per second. 0 removes the cap.
    pub fn files_per_second(mut self, files_per_second: u32) -> Self {
        self.config.files_per_second = files_per_second;
        self
    }

    /// Set the URL template used for set archives.
    pub fn set_url(mut self, template: impl Into<String>) -> Self {
        self.config.set_url = template.into();
        self
    }

    /// Set the URL template used for single beatmaps.
    pub fn beatmap_url(mut self, template: impl Into<String>) -> Self {
        self.config.beatmap_url = template.into();
        self
    }

    /// Set whether to overwrite existing files.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add a single http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`BeatmapDownloader`] with the specified options.
    pub fn build(self) -> BeatmapDownloader {
        BeatmapDownloader::new(self.config)
    }
}
