//! Stores command: lists the stores present in the catalog.

use crate::catalog::{CatalogClient, CatalogFetch};
use crate::config::Config;
use crate::enrich;
use crate::filters::ALL_STORES;
use anyhow::{Context, Result};

/// Fetches the catalog and lists distinct stores with listing counts.
pub struct StoresCommand {
    config: Config,
}

impl StoresCommand {
    /// Creates a new stores command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client).await
    }

    /// Executes the command with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl CatalogFetch) -> Result<String> {
        let catalog = enrich::enrich(client.fetch().await?);

        let mut lines = Vec::new();
        lines.push(format!("{:<20} {:>8}", "Loja", "Anúncios"));
        lines.push(format!("{:-<20} {:-<8}", "", ""));
        lines.push(format!("{:<20} {:>8}", ALL_STORES, catalog.count()));

        for store in catalog.stores() {
            let count = catalog.produtos.iter().filter(|p| p.loja == store).count();
            lines.push(format!("{:<20} {:>8}", store, count));
        }

        Ok(lines.join("\n"))
    }
}
