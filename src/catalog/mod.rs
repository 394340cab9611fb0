//! Catalog acquisition: transport chain, envelope decoding, shape validation,
//! and the data models it produces.

pub mod client;
pub mod models;
pub mod transport;

pub use client::{CatalogClient, CatalogFetch, UNREACHABLE_MESSAGE};
pub use models::{Catalog, EnrichedCatalog, EnrichedListing, Listing};
pub use transport::{default_strategies, Envelope, Strategy, TransportError};
