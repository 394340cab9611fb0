//! HTTP client that walks the transport chain until a strategy delivers a
//! valid catalog document.

use crate::catalog::models::Catalog;
use crate::catalog::transport::{decode_envelope, validate_shape, Strategy, TransportError};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// User-facing message when every strategy has been exhausted.
pub const UNREACHABLE_MESSAGE: &str =
    "Não foi possível carregar os dados. O servidor da API pode estar offline.";

/// Trait for catalog fetching - enables mocking for tests.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    /// Fetches and decodes the catalog document.
    async fn fetch(&self) -> Result<Catalog>;
}

/// Catalog HTTP client. Strategies are tried strictly in order; the first one
/// that survives the full protocol (2xx, JSON, envelope, shape) wins. There
/// are no retries within a strategy and no backoff between strategies.
pub struct CatalogClient {
    client: Client,
    api_url: String,
    strategies: Vec<Strategy>,
}

impl CatalogClient {
    /// Creates a new client from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            strategies: config.strategies.clone(),
        })
    }

    /// Runs the full per-strategy protocol for one chain entry.
    async fn attempt(&self, strategy: &Strategy) -> Result<Catalog, TransportError> {
        let url = strategy.request_url(&self.api_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        // Some proxies drop the content-type header; parse the body regardless.
        let body = response.text().await?;
        let parsed: serde_json::Value = serde_json::from_str(&body)?;

        let candidate = decode_envelope(strategy.envelope, parsed)?;

        if !validate_shape(&candidate) {
            return Err(TransportError::Shape);
        }

        Ok(serde_json::from_value(candidate)?)
    }
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn fetch(&self) -> Result<Catalog> {
        for strategy in &self.strategies {
            info!("Fetching catalog via {}", strategy.name);

            match self.attempt(strategy).await {
                Ok(catalog) => {
                    info!("{} delivered {} listings", strategy.name, catalog.count());
                    return Ok(catalog);
                }
                Err(err) => warn!("{} failed: {}", strategy.name, err),
            }
        }

        anyhow::bail!(UNREACHABLE_MESSAGE)
    }
}
