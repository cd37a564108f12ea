//! Download requests.

use super::config::DownloaderConfig;
use crate::collector::CollectedEntry;
use crate::error::{Error, Result};
use crate::library::ARCHIVE_EXTENSION;

use reqwest::Url;

/// Placeholder substituted with the entry id in URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// What an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadType {
    /// A beatmap set, saved as an `.osz` archive.
    Set,
    /// A single difficulty, saved as an `.osu` file.
    Beatmap,
}

/// A request handed to the downloader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadEntry {
    pub id: u64,
    pub kind: DownloadType,
}

impl DownloadEntry {
    /// Request the archive of a beatmap set.
    pub fn set(id: u64) -> Self {
        Self {
            id,
            kind: DownloadType::Set,
        }
    }

    /// Request a single beatmap file.
    pub fn beatmap(id: u64) -> Self {
        Self {
            id,
            kind: DownloadType::Beatmap,
        }
    }

    /// File name used to save the download on disk.
    pub fn filename(&self) -> String {
        match self.kind {
            DownloadType::Set => format!("{}.{}", self.id, ARCHIVE_EXTENSION),
            DownloadType::Beatmap => format!("{}.osu", self.id),
        }
    }

    /// Resolve the source URL from the configured templates.
    pub fn url(&self, config: &DownloaderConfig) -> Result<Url> {
        let template = match self.kind {
            DownloadType::Set => &config.set_url,
            DownloadType::Beatmap => &config.beatmap_url,
        };
        let raw = template.replace(ID_PLACEHOLDER, &self.id.to_string());
        Url::parse(&raw)
            .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", raw, e)))
    }
}

impl From<&CollectedEntry> for DownloadEntry {
    fn from(entry: &CollectedEntry) -> Self {
        Self::set(entry.id)
    }
}
