//! Configuration loaded from a TOML file.
//!
//! ```toml
//! songs_folder = "/home/me/osu/Songs"
//! api_key = "0123456789abcdef"
//! star_rating_min = 4.0
//! star_rating_max = 5.5
//! mode = 0
//! target_count = 50
//! workers = 4
//! ```
//!
//! The remaining fields are optional. The camelCase keys of older config
//! files (`songsFolder`, `starRating_min`, `downloadMaxed`, ...) are accepted
//! as aliases.

use crate::catalog::{YearMonth, DEFAULT_CATALOG_ENDPOINT};
use crate::collector::{CollectorOptions, Filter, DEFAULT_CURSORS_PER_ATTEMPT};
use crate::error::{Error, Result};
use crate::transfer::{DownloaderBuilder, DEFAULT_SET_URL};

use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn default_catalog_endpoint() -> String {
    DEFAULT_CATALOG_ENDPOINT.to_string()
}

fn default_mirror_url() -> String {
    DEFAULT_SET_URL.to_string()
}

fn default_retries() -> u32 {
    3
}

fn default_cursors_per_attempt() -> usize {
    DEFAULT_CURSORS_PER_ATTEMPT
}

fn default_epoch_year() -> i32 {
    2010
}

fn default_epoch_month() -> u32 {
    1
}

/// Everything a run needs.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Output directory for `.osz` archives.
    #[serde(alias = "songsFolder")]
    pub songs_folder: PathBuf,
    /// Static catalog API key.
    #[serde(alias = "apiKey")]
    pub api_key: String,
    /// Lowest accepted star rating, inclusive.
    #[serde(alias = "starRating_min")]
    pub star_rating_min: f64,
    /// Highest accepted star rating, inclusive.
    #[serde(alias = "starRating_max")]
    pub star_rating_max: f64,
    /// Game mode code.
    pub mode: u8,
    /// Number of sets to collect.
    #[serde(alias = "downloadMaxed")]
    pub target_count: usize,
    /// Number of parallel downloaders.
    pub workers: usize,
    #[serde(default = "default_catalog_endpoint")]
    pub catalog_endpoint: String,
    /// Archive URL template, `{id}` is replaced by the set id.
    #[serde(default = "default_mirror_url")]
    pub mirror_url: String,
    /// Per-downloader start cap, 0 for unlimited.
    #[serde(default)]
    pub files_per_second: u32,
    /// Transient HTTP retries per request.
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_cursors_per_attempt")]
    pub cursors_per_attempt: usize,
    #[serde(default = "default_epoch_year")]
    pub epoch_year: i32,
    #[serde(default = "default_epoch_month")]
    pub epoch_month: u32,
    /// Give up collecting after this many attempts. Unset retries forever.
    #[serde(default)]
    pub max_attempts: Option<u64>,
    /// Pause between collection attempts, in milliseconds.
    #[serde(default)]
    pub retry_delay_ms: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("songs_folder", &self.songs_folder)
            .field("api_key", &"<redacted>")
            .field("star_rating_min", &self.star_rating_min)
            .field("star_rating_max", &self.star_rating_max)
            .field("mode", &self.mode)
            .field("target_count", &self.target_count)
            .field("workers", &self.workers)
            .field("catalog_endpoint", &self.catalog_endpoint)
            .field("mirror_url", &self.mirror_url)
            .field("files_per_second", &self.files_per_second)
            .field("retries", &self.retries)
            .field("cursors_per_attempt", &self.cursors_per_attempt)
            .field("epoch_year", &self.epoch_year)
            .field("epoch_month", &self.epoch_month)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

impl Config {
    /// Read and parse a configuration file. Validation is left to the caller
    /// so that command line overrides can be applied first.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Check the semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must not be empty".into()));
        }
        if !self.star_rating_min.is_finite() || !self.star_rating_max.is_finite() {
            return Err(Error::Config("star ratings must be finite numbers".into()));
        }
        if self.star_rating_min > self.star_rating_max {
            return Err(Error::Config(format!(
                "star_rating_min ({}) is greater than star_rating_max ({})",
                self.star_rating_min, self.star_rating_max
            )));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".into()));
        }
        if self.cursors_per_attempt == 0 {
            return Err(Error::Config("cursors_per_attempt must be at least 1".into()));
        }
        if !(1..=12).contains(&self.epoch_month) {
            return Err(Error::Config(format!(
                "epoch_month must be between 1 and 12, got {}",
                self.epoch_month
            )));
        }
        if !self.mirror_url.contains("{id}") {
            return Err(Error::Config(format!(
                "mirror_url \"{}\" has no {{id}} placeholder",
                self.mirror_url
            )));
        }
        Url::parse(&self.catalog_endpoint).map_err(|e| {
            Error::Config(format!(
                "catalog_endpoint \"{}\" cannot be parsed: {}",
                self.catalog_endpoint, e
            ))
        })?;
        Ok(())
    }

    pub fn filter(&self) -> Filter {
        Filter::new(self.star_rating_min, self.star_rating_max, self.mode)
    }

    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            cursors_per_attempt: self.cursors_per_attempt,
            epoch: YearMonth::new(self.epoch_year, self.epoch_month),
            until: None,
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Builder for one worker's downloader.
    pub fn downloader(&self) -> DownloaderBuilder {
        DownloaderBuilder::new()
            .directory(self.songs_folder.clone())
            .files_per_second(self.files_per_second)
            .retries(self.retries)
            .set_url(self.mirror_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        songs_folder = "/tmp/songs"
        api_key = "key"
        star_rating_min = 2.0
        star_rating_max = 6.0
        mode = 0
        target_count = 10
        workers = 3
    "#;

    #[test]
    fn test_defaults_for_optional_fields() {
        let cfg = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(cfg.catalog_endpoint, DEFAULT_CATALOG_ENDPOINT);
        assert_eq!(cfg.mirror_url, DEFAULT_SET_URL);
        assert_eq!(cfg.files_per_second, 0);
        assert_eq!(cfg.retries, 3);
        assert_eq!(cfg.cursors_per_attempt, 5);
        assert_eq!((cfg.epoch_year, cfg.epoch_month), (2010, 1));
        assert!(cfg.max_attempts.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_camel_case_aliases() {
        let cfg = Config::from_toml(
            r#"
            songsFolder = "Songs"
            apiKey = "key"
            starRating_min = 1.5
            starRating_max = 3
            mode = 1
            downloadMaxed = 20
            workers = 2
        "#,
        )
        .unwrap();
        assert_eq!(cfg.songs_folder, PathBuf::from("Songs"));
        assert_eq!(cfg.star_rating_max, 3.0);
        assert_eq!(cfg.target_count, 20);
    }

    #[test]
    fn test_missing_required_field() {
        let err = Config::from_toml("api_key = \"key\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_inverted_rating_range_is_rejected() {
        let mut cfg = Config::from_toml(MINIMAL).unwrap();
        cfg.star_rating_min = 7.0;
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let mut cfg = Config::from_toml(MINIMAL).unwrap();
        cfg.workers = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_mirror_needs_placeholder() {
        let mut cfg = Config::from_toml(MINIMAL).unwrap();
        cfg.mirror_url = "https://mirror.example/d/".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut cfg = Config::from_toml(MINIMAL).unwrap();
        cfg.api_key = "very-secret".into();
        assert!(!format!("{:?}", cfg).contains("very-secret"));
    }

    #[test]
    fn test_derived_settings() {
        let cfg = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(cfg.filter(), Filter::new(2.0, 6.0, 0));

        let options = cfg.collector_options();
        assert_eq!(options.epoch, YearMonth::new(2010, 1));
        assert_eq!(options.retry_delay, Duration::ZERO);

        let downloader = cfg.downloader().build();
        assert_eq!(downloader.directory(), &PathBuf::from("/tmp/songs"));
        assert_eq!(downloader.files_per_second(), 0);
    }
}
