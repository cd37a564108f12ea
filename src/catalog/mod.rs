//! Catalog module: querying the beatmap search API.
//!
//! The upstream catalog cannot be paged by rank, so the collector samples it
//! through random "since" date cursors. This module provides the pieces for
//! that:
//!
//! - [`item`] - the [`CatalogItem`] returned by a query and body parsing
//! - [`cursor`] - [`SinceCursor`] and uniform month sampling
//! - [`client`] - [`OsuCatalog`], the HTTP implementation of [`Catalog`]
//!
//! # Examples
//!
//! ```rust
//! use beatmap_sampler::catalog::{SinceCursor, YearMonth};
//!
//! let cursor = SinceCursor::from(YearMonth::new(2014, 3));
//! assert_eq!(cursor.to_string(), "2014-03-01");
//! ```

pub mod client;
pub mod cursor;
pub mod item;

pub use client::{OsuCatalog, DEFAULT_CATALOG_ENDPOINT};
pub use cursor::{random_since, SinceCursor, YearMonth};
pub use item::{parse_catalog_body, CatalogItem};

use crate::error::Result;
use std::future::Future;

/// A source of catalog items that can be queried by "since" cursor.
///
/// Implementations return every item the upstream reports for the cursor. A
/// response that is not a list of items is an empty result, not an error.
pub trait Catalog {
    /// Fetch the items modified or approved on or after `since`.
    fn fetch_since(&self, since: &SinceCursor) -> impl Future<Output = Result<Vec<CatalogItem>>>;
}
