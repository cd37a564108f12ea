//! Error handling for the beatmap sampler.
//!
//! Every fallible operation in the crate returns [`Result`]. Callers decide
//! whether a failure is fatal: the collector logs failed catalog queries and
//! retries, the dispatcher logs failed workers and lets their siblings finish.

use std::error::Error as _;
use std::io;
use thiserror::Error;

/// Errors that can happen while sampling or downloading beatmaps.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures failures that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A URL could not be parsed or built from a template.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Raised while creating the output directory or writing archives.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack (retries, tracing).
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The server answered with a non-success status code.
    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// A catalog response body was not valid JSON.
    #[error("Malformed JSON response")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The configuration is semantically invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The configuration file could not be parsed.
    #[error("Cannot parse configuration file")]
    ConfigParse {
        #[from]
        source: toml::de::Error,
    },

    /// Every catalog query of a collection attempt failed.
    #[error("All {cursors} catalog queries of attempt {attempt} failed")]
    AttemptFailed { attempt: u64, cursors: usize },
}

impl Error {
    /// The message followed by every cause in the source chain, separated by
    /// `": "`.
    ///
    /// The wrapper variants (`IOError`, `Reqwest`, `Middleware`, ...) only
    /// name the failing layer; the cause is what tells a refused connection
    /// from a timeout.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        message
    }
}

/// Result type alias for operations that can fail with a crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
