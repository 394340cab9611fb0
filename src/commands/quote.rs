//! Quote command: runs only the live USD/BRL probe.

use crate::config::{Config, OutputFormat};
use crate::format::format_brl;
use crate::quote::{GeminiQuoteClient, QuoteProbe};
use anyhow::{Context, Result};

/// Fetches the live quote and renders it.
pub struct QuoteCommand {
    config: Config,
}

impl QuoteCommand {
    /// Creates a new quote command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the probe and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client =
            GeminiQuoteClient::new(&self.config).context("Failed to create quote client")?;
        self.execute_with_client(&client).await
    }

    /// Executes the probe with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl QuoteProbe) -> Result<String> {
        let rate = client
            .latest()
            .await
            .context("Não foi possível obter a cotação em tempo real")?;

        Ok(match self.config.format {
            OutputFormat::Json => serde_json::json!({ "liveQuote": rate }).to_string(),
            _ => format!("Dólar Comercial: {}", format_brl(rate)),
        })
    }
}
