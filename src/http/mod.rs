//! HTTP module containing the shared client setup.
//!
//! Both the catalog queries and the archive transfers go through a
//! [`ClientWithMiddleware`](reqwest_middleware::ClientWithMiddleware) built by
//! [`create_http_client`], so every request gets the same tracing and
//! transient-retry behavior.
//!
//! # Examples
//!
//! ```rust
//! use beatmap_sampler::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     retries: 5,
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClientConfig, USER_AGENT_VALUE};
