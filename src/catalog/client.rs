//! HTTP implementation of the [`Catalog`] trait for the osu! v1 API.

use super::cursor::SinceCursor;
use super::item::{parse_catalog_body, CatalogItem};
use super::Catalog;
use crate::error::{Error, Result};

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::debug;

/// Default search endpoint.
pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://osu.ppy.sh/api/get_beatmaps";

/// Queries `GET <endpoint>?k=<api key>&since=<cursor>`.
#[derive(Clone)]
pub struct OsuCatalog {
    client: ClientWithMiddleware,
    endpoint: Url,
    api_key: String,
}

impl fmt::Debug for OsuCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsuCatalog")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OsuCatalog {
    /// Creates a new [`OsuCatalog`].
    pub fn new(
        client: ClientWithMiddleware,
        endpoint: &str,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", endpoint, e))
        })?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the query URL for a cursor.
    pub fn query_url(&self, since: &SinceCursor) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("k", &self.api_key)
            .append_pair("since", &since.to_string());
        url
    }
}

impl Catalog for OsuCatalog {
    async fn fetch_since(&self, since: &SinceCursor) -> Result<Vec<CatalogItem>> {
        debug!("Querying catalog since {}", since);
        let res = self.client.get(self.query_url(since)).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: self.endpoint.to_string(),
            });
        }

        let body = res.bytes().await?;
        let items = parse_catalog_body(&body)?;
        debug!("Catalog returned {} items since {}", items.len(), since);
        Ok(items)
    }
}
