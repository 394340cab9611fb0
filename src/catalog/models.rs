//! Data models for the upstream price catalog.

use serde::{Deserialize, Deserializer, Serialize};

/// One store's offer for a single SKU, as delivered by the upstream endpoint.
///
/// The feed is hand-maintained; any field may be missing, empty, or carry the
/// wrong JSON type. Lenient deserializers absorb that (strings fall back to
/// `""`, numerics to `0`) so a bad row never aborts a sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Listing title as typed by the store
    #[serde(default, deserialize_with = "lenient_string")]
    pub anuncio: String,
    /// Store name
    #[serde(default, deserialize_with = "lenient_string")]
    pub loja: String,
    /// Price in USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub valor_dolar: f64,
    /// Cost price in BRL
    #[serde(default, deserialize_with = "lenient_f64")]
    pub preco_custo: f64,
    /// Sale price in BRL
    #[serde(default, deserialize_with = "lenient_f64")]
    pub preco_venda: f64,
}

/// A listing after the local enrichment pass: canonical title plus a color
/// swatch from the fixed palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedListing {
    /// Canonical title (original title when it is not an iPhone listing)
    pub anuncio: String,
    /// Store name
    pub loja: String,
    /// Price in USD
    pub valor_dolar: f64,
    /// Cost price in BRL
    pub preco_custo: f64,
    /// Sale price in BRL
    pub preco_venda: f64,
    /// Seven-char hex swatch, always one of the palette values
    pub cor_hex: String,
}

impl EnrichedListing {
    /// Gross profit in BRL (sale minus cost).
    pub fn gross_profit(&self) -> f64 {
        self.preco_venda - self.preco_custo
    }

    /// Margin percent over cost. Zero when the cost price is missing.
    pub fn margin_percent(&self) -> f64 {
        if self.preco_custo > 0.0 {
            (self.preco_venda / self.preco_custo - 1.0) * 100.0
        } else {
            0.0
        }
    }
}

/// Catalog document as returned by the upstream endpoint.
///
/// Only `produtos` is required for the document to be considered valid;
/// `totalProdutos` is informational and is never reconciled against
/// `produtos.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Server-side timestamp of the last catalog rebuild (ISO-ish string)
    #[serde(default, deserialize_with = "lenient_string")]
    pub atualizado_em: String,
    /// USD/BRL snapshot taken server-side (the "reference quote")
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cotacao_dolar: f64,
    /// Informational product count as reported by the server
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_produtos: u64,
    /// The listings, in server order
    pub produtos: Vec<Listing>,
}

impl Catalog {
    /// Returns the number of listings actually present.
    pub fn count(&self) -> usize {
        self.produtos.len()
    }

    /// Returns true if the catalog carries no listings.
    pub fn is_empty(&self) -> bool {
        self.produtos.is_empty()
    }
}

/// Catalog with every listing enriched. Header fields are carried over
/// untouched from the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCatalog {
    pub atualizado_em: String,
    pub cotacao_dolar: f64,
    pub total_produtos: u64,
    pub produtos: Vec<EnrichedListing>,
}

impl EnrichedCatalog {
    /// Returns the number of listings.
    pub fn count(&self) -> usize {
        self.produtos.len()
    }

    /// Returns true if there are no listings.
    pub fn is_empty(&self) -> bool {
        self.produtos.is_empty()
    }

    /// Distinct store names, first-seen order, empty names skipped.
    pub fn stores(&self) -> Vec<String> {
        let mut stores: Vec<String> = Vec::new();
        for listing in &self.produtos {
            if !listing.loja.is_empty() && !stores.iter().any(|s| s == &listing.loja) {
                stores.push(listing.loja.clone());
            }
        }
        stores
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => {
            n.as_u64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0).max(0.0) as u64)
        }
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
