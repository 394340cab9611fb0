//! Listing filtering system with composable filters.

pub mod query;
pub mod store;

use crate::catalog::models::EnrichedListing;

pub use query::QueryFilter;
pub use store::StoreFilter;

/// Store tab meaning "no store filter".
pub const ALL_STORES: &str = "Todas";

/// Trait for filtering listings.
pub trait Filter: Send + Sync {
    /// Returns true if the listing passes the filter.
    fn matches(&self, listing: &EnrichedListing) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a listing passes all filters.
    pub fn matches(&self, listing: &EnrichedListing) -> bool {
        self.filters.iter().all(|f| f.matches(listing))
    }

    /// Filters a collection of listings, keeping the incoming order.
    pub fn apply(&self, listings: Vec<EnrichedListing>) -> Vec<EnrichedListing> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Restricts results to a single store. `None`, empty, and the "Todas"
    /// tab all mean every store.
    pub fn store(mut self, store: Option<String>) -> Self {
        if let Some(store) = store {
            if !store.is_empty() && store != ALL_STORES {
                self.chain.add(StoreFilter::new(store));
            }
        }
        self
    }

    /// Adds a free-text query over title and store name.
    pub fn query(mut self, query: Option<String>) -> Self {
        if let Some(query) = query {
            if !query.is_empty() {
                self.chain.add(QueryFilter::new(query));
            }
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
