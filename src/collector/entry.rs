//! The unit of work produced by collection.

use crate::catalog::CatalogItem;

use std::fmt;

/// A beatmap set selected for download.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectedEntry {
    /// Set identifier, unique within a collection.
    pub id: u64,
    /// `"artist - title"`.
    pub name: String,
}

impl CollectedEntry {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<&CatalogItem> for CollectedEntry {
    fn from(item: &CatalogItem) -> Self {
        Self::new(item.set_id, item.name())
    }
}

impl fmt::Display for CollectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}
