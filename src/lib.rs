//! comppy - Stateless iPhone price-comparison CLI
//!
//! Fetches a precomputed catalog from Brazilian stores over a chain of
//! CORS-bypass transports, enriches every listing locally, and shows a
//! live USD/BRL quote alongside the catalog's own reference rate.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod enrich;
pub mod filters;
pub mod format;
pub mod quote;
pub mod session;

pub use catalog::models::{Catalog, EnrichedCatalog, EnrichedListing, Listing};
pub use config::Config;
pub use session::Session;
