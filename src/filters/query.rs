//! Free-text query filtering over title and store name.

use super::Filter;
use crate::catalog::models::EnrichedListing;

/// Keeps listings whose title or store name contains the query,
/// case-insensitively.
pub struct QueryFilter {
    query: String,
}

impl QueryFilter {
    /// Creates a new query filter.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into().to_lowercase() }
    }
}

impl Filter for QueryFilter {
    fn matches(&self, listing: &EnrichedListing) -> bool {
        listing.anuncio.to_lowercase().contains(&self.query)
            || listing.loja.to_lowercase().contains(&self.query)
    }

    fn description(&self) -> String {
        format!("Query: {}", self.query)
    }
}
