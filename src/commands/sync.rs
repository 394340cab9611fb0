//! Sync command: runs both pipelines and renders the published result.

use crate::catalog::{CatalogClient, CatalogFetch};
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::quote::{GeminiQuoteClient, QuoteProbe};
use crate::session::Session;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Executes a full sync: catalog pipeline plus live quote probe.
pub struct SyncCommand {
    config: Config,
    store: Option<String>,
    query: Option<String>,
    no_quote: bool,
}

impl SyncCommand {
    /// Creates a new sync command.
    pub fn new(config: Config) -> Self {
        Self { config, store: None, query: None, no_quote: false }
    }

    /// Restricts output to one store and/or a free-text query.
    pub fn with_filters(mut self, store: Option<String>, query: Option<String>) -> Self {
        self.store = store;
        self.query = query;
        self
    }

    /// Skips the live quote probe entirely.
    pub fn skip_quote(mut self, skip: bool) -> Self {
        self.no_quote = skip;
        self
    }

    /// Executes the sync and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let catalog_client =
            CatalogClient::new(&self.config).context("Failed to create HTTP client")?;
        let quote_client =
            GeminiQuoteClient::new(&self.config).context("Failed to create quote client")?;

        self.execute_with_clients(&catalog_client, &quote_client).await
    }

    /// Executes the sync with provided clients (for testing).
    pub async fn execute_with_clients(
        &self,
        catalog_client: &impl CatalogFetch,
        quote_client: &impl QuoteProbe,
    ) -> Result<String> {
        let mut session = Session::new();

        if self.no_quote {
            session.sync_catalog(catalog_client).await;
        } else {
            session.sync(catalog_client, quote_client).await;
        }

        // One-shot invocation: an exhausted chain has no prior catalog to
        // fall back to, so the message becomes the command's error.
        if let Some(error) = &session.error {
            anyhow::bail!("{}", error);
        }

        let mut catalog = session.catalog.context("No catalog published")?;

        let filters = FilterChainBuilder::new()
            .store(self.store.clone())
            .query(self.query.clone())
            .build();

        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
            catalog.produtos = filters.apply(catalog.produtos);
        }

        info!("Rendering {} listings", catalog.count());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_catalog(&catalog, session.live_quote))
    }
}
