//! Logging initialization.
//!
//! `RUST_LOG` takes precedence; otherwise the level follows the `-v`/`-q`
//! flags.

use crate::error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info",
        1 => "info,beatmap_sampler=debug",
        _ => "debug",
    }
}

/// Install the global `fmt` subscriber.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Internal(format!("cannot initialize logging: {}", e)))
}
