//! Store-based listing filtering.

use super::Filter;
use crate::catalog::models::EnrichedListing;

/// Keeps only listings from one store. Matching is exact: store names come
/// from the catalog itself, so there is nothing to normalize.
pub struct StoreFilter {
    loja: String,
}

impl StoreFilter {
    /// Creates a new store filter.
    pub fn new(loja: impl Into<String>) -> Self {
        Self { loja: loja.into() }
    }
}

impl Filter for StoreFilter {
    fn matches(&self, listing: &EnrichedListing) -> bool {
        listing.loja == self.loja
    }

    fn description(&self) -> String {
        format!("Store: {}", self.loja)
    }
}
