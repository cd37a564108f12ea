//! Collector module: random sampling of the catalog.
//!
//! The [`Collector`] queries the catalog with random date cursors, keeps the
//! items matching a [`Filter`], and accumulates unique [`CollectedEntry`]
//! values until the target count is reached.
//!
//! - [`entry`] - the [`CollectedEntry`] handed to the dispatcher
//! - [`filter`] - the [`Filter`] predicate and the unbiased [`shuffle`]
//! - [`collector`] - the collection loop
//!
//! # Examples
//!
//! ```rust,no_run
//! use beatmap_sampler::catalog::OsuCatalog;
//! use beatmap_sampler::collector::{Collector, Filter};
//! use beatmap_sampler::http::{create_http_client, HttpClientConfig};
//! use beatmap_sampler::library::SongsFolder;
//!
//! # async fn example() -> Result<(), beatmap_sampler::Error> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let catalog = OsuCatalog::new(client, "https://osu.ppy.sh/api/get_beatmaps", "api-key")?;
//! let filter = Filter::new(4.0, 6.0, 0);
//! let mut collector = Collector::new(catalog, SongsFolder::new("Songs"), filter);
//! let collection = collector.collect(25).await;
//! println!("{} sets after {} attempts", collection.len(), collection.attempts());
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod entry;
pub mod filter;

pub use collector::{Collection, Collector, CollectorOptions, DEFAULT_CURSORS_PER_ATTEMPT};
pub use entry::CollectedEntry;
pub use filter::{shuffle, Filter};
