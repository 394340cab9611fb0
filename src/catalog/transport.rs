//! Transport strategies for reaching the catalog endpoint.
//!
//! The upstream feed sits behind CORS-hostile and flaky infrastructure, so the
//! fetch walks an ordered list of strategies: the origin itself, then two
//! public CORS proxies with different response envelopes. The list is plain
//! data so operators can reorder or swap entries from the config file.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Default upstream catalog endpoint.
pub const DEFAULT_API_URL: &str = "https://comppyrender.onrender.com/api/precos";

/// Failure modes of a single strategy attempt. Every variant is recoverable:
/// the chain advances to the next strategy.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level failure (DNS, connect, timeout, body read)
    #[error("request failed: {0}")]
    Request(#[from] wreq::Error),

    /// Non-2xx HTTP status
    #[error("status {0}")]
    Status(u16),

    /// Response body is not the JSON we expect
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// Proxy envelope missing or its inner document unparseable
    #[error("proxy envelope missing or corrupt")]
    Envelope,

    /// Decoded document does not look like a catalog
    #[error("document is not a catalog")]
    Shape,
}

/// How a strategy wraps the catalog document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// The response body is the catalog document itself
    #[default]
    Raw,
    /// allorigins.win style: `{ "contents": "<stringified JSON>" }`
    AllOrigins,
}

/// One entry of the transport chain: a URL template plus an envelope rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    /// Display name used in logs
    pub name: String,
    /// URL template. `{url}` expands to the endpoint as-is, `{enc}` to its
    /// percent-encoded form, `{ts}` to the current epoch in milliseconds
    /// (recomputed on every attempt, so it doubles as a cache buster).
    pub template: String,
    /// Envelope rule for this strategy's responses
    #[serde(default)]
    pub envelope: Envelope,
}

impl Strategy {
    /// Expands the template into a concrete request URL.
    pub fn request_url(&self, api_url: &str) -> String {
        let epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        self.template
            .replace("{url}", api_url)
            .replace("{enc}", &urlencoding::encode(api_url))
            .replace("{ts}", &epoch_ms.to_string())
    }
}

/// The stock three-entry chain: origin, allorigins, corsproxy.
pub fn default_strategies() -> Vec<Strategy> {
    vec![
        Strategy {
            name: "Direto".to_string(),
            template: "{url}".to_string(),
            envelope: Envelope::Raw,
        },
        Strategy {
            name: "AllOrigins Proxy".to_string(),
            template: "https://api.allorigins.win/get?url={enc}&t={ts}".to_string(),
            envelope: Envelope::AllOrigins,
        },
        Strategy {
            name: "CorsProxy.io".to_string(),
            template: "https://corsproxy.io/?{enc}".to_string(),
            envelope: Envelope::Raw,
        },
    ]
}

/// Unwraps a strategy's response body into the candidate catalog document.
pub fn decode_envelope(
    envelope: Envelope,
    body: serde_json::Value,
) -> Result<serde_json::Value, TransportError> {
    match envelope {
        Envelope::Raw => Ok(body),
        Envelope::AllOrigins => {
            let contents = body
                .get("contents")
                .and_then(|c| c.as_str())
                .ok_or(TransportError::Envelope)?;

            serde_json::from_str(contents).map_err(|_| TransportError::Envelope)
        }
    }
}

/// Shape check: an object with a `produtos` array. Nothing deeper; the models
/// absorb malformed fields on their own, and `totalProdutos` is never
/// reconciled against the actual listing count.
pub fn validate_shape(candidate: &serde_json::Value) -> bool {
    candidate.is_object()
        && candidate.get("produtos").map(|p| p.is_array()).unwrap_or(false)
}
