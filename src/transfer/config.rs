//! Configuration structures and defaults for the downloader.

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;

/// Mirror serving `.osz` archives by set id.
pub const DEFAULT_SET_URL: &str = "https://catboy.best/d/{id}";

/// Source of single `.osu` files by beatmap id.
pub const DEFAULT_BEATMAP_URL: &str = "https://osu.ppy.sh/osu/{id}";

/// Configuration structure for the downloader
#[derive(Clone, Debug)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Number of retries per downloaded file.
    pub retries: u32,
    /// Maximum number of files started per second, 0 for no limit.
    pub files_per_second: u32,
    /// URL template for set archives, `{id}` is replaced by the set id.
    pub set_url: String,
    /// URL template for single beatmaps, `{id}` is replaced by the beatmap id.
    pub beatmap_url: String,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Force download and overwrite existing files.
    pub overwrite: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            retries: 3,
            files_per_second: 0,
            set_url: DEFAULT_SET_URL.to_string(),
            beatmap_url: DEFAULT_BEATMAP_URL.to_string(),
            headers: None,
            overwrite: false,
        }
    }
}
