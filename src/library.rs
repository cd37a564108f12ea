//! On-disk archive lookups.
//!
//! The songs folder is the only state shared across runs: a set whose
//! `<id>.osz` archive already exists is never collected again, and after a
//! download the same lookup tells whether the archive actually landed.

use std::path::{Path, PathBuf};

/// Extension of beatmap set archives.
pub const ARCHIVE_EXTENSION: &str = "osz";

/// Where beatmap set archives live.
pub trait Library {
    /// Path of the archive for `set_id`.
    fn archive_path(&self, set_id: u64) -> PathBuf;

    /// Whether the archive for `set_id` exists as a regular file.
    fn contains(&self, set_id: u64) -> bool {
        self.archive_path(set_id).is_file()
    }
}

/// A directory of `<set id>.osz` archives.
#[derive(Debug, Clone)]
pub struct SongsFolder {
    root: PathBuf,
}

impl SongsFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Library for SongsFolder {
    fn archive_path(&self, set_id: u64) -> PathBuf {
        self.root.join(format!("{}.{}", set_id, ARCHIVE_EXTENSION))
    }
}
