//! Selection predicate and shuffling.

use crate::catalog::CatalogItem;

use rand::seq::SliceRandom;
use rand::Rng;

/// Keeps approved items of one game mode within an inclusive star range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filter {
    pub min_rating: f64,
    pub max_rating: f64,
    pub mode: u8,
}

impl Filter {
    pub fn new(min_rating: f64, max_rating: f64, mode: u8) -> Self {
        Self {
            min_rating,
            max_rating,
            mode,
        }
    }

    /// `min <= rating <= max && mode == configured && approved > 0`.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        item.difficulty_rating >= self.min_rating
            && item.difficulty_rating <= self.max_rating
            && item.mode == self.mode
            && item.is_approved()
    }

    /// The matching items of `items`, in order.
    pub fn apply<'a>(
        &self,
        items: &'a [CatalogItem],
    ) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        let filter = *self;
        items.iter().filter(move |item| filter.matches(item))
    }
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
