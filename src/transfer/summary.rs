//! Per-file download results.

use super::entry::DownloadEntry;
use reqwest::StatusCode;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download was skipped with reason
    Skipped(String),
    /// Download completed successfully
    Success,
}

/// Represents a [`DownloadEntry`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Requested entry.
    entry: DownloadEntry,
    /// HTTP status code.
    statuscode: StatusCode,
    /// Download size in bytes.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(entry: DownloadEntry, statuscode: StatusCode, size: u64) -> Self {
        Self {
            entry,
            statuscode,
            size,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    pub fn statuscode(&self) -> StatusCode {
        self.statuscode
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn entry(&self) -> &DownloadEntry {
        &self.entry
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the file ended up on disk, downloaded now or before.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Status::Success | Status::Skipped(_))
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Skipped(format!("{}", msg)),
            ..self
        }
    }
}
