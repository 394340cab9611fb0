//! Live USD/BRL quote from a web-search-grounded LLM call.
//!
//! Fully independent of the catalog pipeline: it runs concurrently with the
//! fetch and its failures are logged, never fatal.

use crate::config::Config;
use crate::quote::extract::extract_rate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use wreq::Client;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";

/// Fixed prompt. The reply is free text; only the first decimal substring is
/// consumed.
pub const QUOTE_PROMPT: &str = "Retorne apenas o valor numérico da cotação do dólar para real brasileiro (USD/BRL) agora. Exemplo: 5.85.";

/// Trait for the live quote lookup - enables mocking for tests.
#[async_trait]
pub trait QuoteProbe: Send + Sync {
    /// Returns the current USD/BRL rate.
    async fn latest(&self) -> Result<f64>;
}

/// Gemini generateContent client with the web-search tool enabled.
pub struct GeminiQuoteClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiQuoteClient {
    /// Creates a new quote client from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, GEMINI_BASE.to_string())
    }

    /// Creates a new quote client with a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl QuoteProbe for GeminiQuoteClient {
    async fn latest(&self) -> Result<f64> {
        if self.api_key.is_empty() {
            anyhow::bail!("API_KEY is not set");
        }

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        debug!("POST {}", url);

        let request = GenerateRequest {
            contents: vec![RequestContent { parts: vec![Part { text: QUOTE_PROMPT }] }],
            tools: vec![Tool { google_search: GoogleSearch {} }],
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(serde_json::to_string(&request)?)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Quote service returned status: {}", status);
        }

        let body = response.text().await.context("Failed to read response body")?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).context("Failed to decode response")?;

        let text = parsed.first_text();
        extract_rate(&text)
            .with_context(|| format!("No decimal value in response: {:?}", text))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config(key: Option<&str>) -> Config {
        Config { api_key: key.map(String::from), ..Config::default() }
    }

    fn gemini_reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": text}],
                    "role": "model"
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_quote_success_comma_decimal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("cotação do dólar"))
            .and(body_string_contains("google_search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(gemini_reply("O dólar está em R$ 5,87 hoje.")),
            )
            .mount(&mock_server)
            .await;

        let config = make_test_config(Some("test-key"));
        let client = GeminiQuoteClient::with_base_url(&config, mock_server.uri()).unwrap();

        let rate = client.latest().await.unwrap();
        assert_eq!(rate, 5.87);
    }

    #[tokio::test]
    async fn test_quote_success_point_decimal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("5.85")))
            .mount(&mock_server)
            .await;

        let config = make_test_config(Some("test-key"));
        let client = GeminiQuoteClient::with_base_url(&config, mock_server.uri()).unwrap();

        assert_eq!(client.latest().await.unwrap(), 5.85);
    }

    #[tokio::test]
    async fn test_quote_missing_key() {
        let config = make_test_config(None);
        let client =
            GeminiQuoteClient::with_base_url(&config, "http://localhost".to_string()).unwrap();

        let err = client.latest().await.unwrap_err();
        assert!(err.to_string().contains("API_KEY"));
    }

    #[tokio::test]
    async fn test_quote_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let config = make_test_config(Some("test-key"));
        let client = GeminiQuoteClient::with_base_url(&config, mock_server.uri()).unwrap();

        let err = client.latest().await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_quote_without_decimal_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("sem cotação")))
            .mount(&mock_server)
            .await;

        let config = make_test_config(Some("test-key"));
        let client = GeminiQuoteClient::with_base_url(&config, mock_server.uri()).unwrap();

        let err = client.latest().await.unwrap_err();
        assert!(err.to_string().contains("No decimal value"));
    }

    #[tokio::test]
    async fn test_quote_empty_candidates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&mock_server)
            .await;

        let config = make_test_config(Some("test-key"));
        let client = GeminiQuoteClient::with_base_url(&config, mock_server.uri()).unwrap();

        assert!(client.latest().await.is_err());
    }

    #[tokio::test]
    async fn test_model_from_config() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("5,10")))
            .mount(&mock_server)
            .await;

        let mut config = make_test_config(Some("test-key"));
        config.model = "gemini-2.5-flash".to_string();
        let client = GeminiQuoteClient::with_base_url(&config, mock_server.uri()).unwrap();

        assert_eq!(client.latest().await.unwrap(), 5.10);
    }
}
