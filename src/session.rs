//! Published session state: what the two pipelines expose to renderers.
//!
//! The catalog pipeline and the live quote probe run concurrently and are
//! fully independent; neither blocks the other and failure of one never
//! touches the other's published value. Last write wins, no versioning.

use crate::catalog::models::{Catalog, EnrichedCatalog};
use crate::catalog::CatalogFetch;
use crate::enrich;
use crate::quote::QuoteProbe;
use anyhow::Result;
use tracing::{info, warn};

/// Latest published results of both pipelines.
#[derive(Debug, Default)]
pub struct Session {
    /// Latest enriched catalog, kept across failed syncs
    pub catalog: Option<EnrichedCatalog>,
    /// Latest LLM-sourced USD/BRL rate, kept across failed probes
    pub live_quote: Option<f64>,
    /// True while the first catalog is being fetched and none exists yet
    pub loading: bool,
    /// User-facing message after the transport chain was exhausted
    pub error: Option<String>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-runs both pipelines and publishes their results.
    pub async fn sync(
        &mut self,
        catalog_client: &impl CatalogFetch,
        quote_client: &impl QuoteProbe,
    ) {
        self.loading = self.catalog.is_none();

        let (catalog, quote) = tokio::join!(catalog_client.fetch(), quote_client.latest());

        self.publish_quote(quote);
        self.publish_catalog(catalog);

        self.loading = false;
    }

    /// Re-runs only the catalog pipeline.
    pub async fn sync_catalog(&mut self, catalog_client: &impl CatalogFetch) {
        self.loading = self.catalog.is_none();
        let result = catalog_client.fetch().await;
        self.publish_catalog(result);
        self.loading = false;
    }

    /// Re-runs only the live quote probe.
    pub async fn sync_quote(&mut self, quote_client: &impl QuoteProbe) {
        let result = quote_client.latest().await;
        self.publish_quote(result);
    }

    /// A fetched catalog replaces the published one and clears any error.
    /// On failure only `error` is set; the prior catalog stays published.
    fn publish_catalog(&mut self, result: Result<Catalog>) {
        match result {
            Ok(catalog) => {
                info!("Catalog fetched: {} listings", catalog.count());
                self.catalog = Some(enrich::enrich(catalog));
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Probe failures are logged only; the previous value stays published.
    fn publish_quote(&mut self, result: Result<f64>) {
        match result {
            Ok(rate) => {
                info!("Live USD/BRL quote: {}", rate);
                self.live_quote = Some(rate);
            }
            Err(err) => warn!("Live quote probe failed: {:#}", err),
        }
    }
}
