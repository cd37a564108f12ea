//! Catalog search results.
//!
//! The v1 beatmap API encodes every numeric field as a JSON string
//! (`"difficultyrating": "5.3104"`), so the numeric fields accept both
//! strings and numbers.

use crate::error::Result;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// One result of a catalog query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    /// Identifier of the set the beatmap belongs to.
    #[serde(rename = "beatmapset_id", deserialize_with = "string_or_number")]
    pub set_id: u64,
    /// Identifier of the beatmap itself.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub beatmap_id: Option<u64>,
    /// Star rating.
    #[serde(rename = "difficultyrating", deserialize_with = "string_or_number")]
    pub difficulty_rating: f64,
    /// Game mode code (0 osu!, 1 taiko, 2 catch, 3 mania).
    #[serde(deserialize_with = "string_or_number")]
    pub mode: u8,
    /// Approval status, positive for ranked/approved/loved content.
    #[serde(deserialize_with = "string_or_number")]
    pub approved: i32,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    /// Difficulty name.
    #[serde(default)]
    pub version: Option<String>,
}

impl CatalogItem {
    /// Display name of the set, `"artist - title"`.
    pub fn name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// Whether the approval status denotes ranked-class content.
    pub fn is_approved(&self) -> bool {
        self.approved > 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Str(String),
    Num(serde_json::Number),
}

impl RawNumber {
    fn parse<T>(self) -> std::result::Result<T, String>
    where
        T: FromStr,
        T::Err: Display,
    {
        let text = match self {
            RawNumber::Str(s) => s,
            RawNumber::Num(n) => n.to_string(),
        };
        text.trim()
            .parse()
            .map_err(|e| format!("invalid number {:?}: {}", text, e))
    }
}

fn string_or_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    RawNumber::deserialize(deserializer)?
        .parse()
        .map_err(de::Error::custom)
}

fn optional_string_or_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Parse a catalog response body.
///
/// A JSON array yields its items; entries that do not look like a catalog
/// item are dropped. Any other JSON value (the API answers errors with an
/// object) yields an empty list. Only a body that is not JSON at all is an
/// error.
pub fn parse_catalog_body(body: &[u8]) -> Result<Vec<CatalogItem>> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    let serde_json::Value::Array(values) = value else {
        debug!("Catalog response is not a list, treating it as empty");
        return Ok(Vec::new());
    };

    let items = values
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<CatalogItem>(v) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("Dropping malformed catalog item: {}", e);
                None
            }
        })
        .collect();

    Ok(items)
}
