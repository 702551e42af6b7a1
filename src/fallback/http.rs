//! HTTP client for the fallback prediction service.
//!
//! Posts `{ model, data }` to `{base_url}/predict` and expects a JSON body
//! with at least a `prediction` field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{FallbackPrediction, FallbackService};
use crate::{DiagnosError, Result};

/// Default base URL of the fallback service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Client for a remote prediction service.
#[derive(Clone)]
pub struct HttpFallback {
    http: Client,
    base_url: String,
}

#[derive(Serialize)]
struct FallbackRequest<'a> {
    model: &'a str,
    data: &'a Value,
}

impl HttpFallback {
    /// Create a client for `base_url` with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            DiagnosError::Configuration(format!("Failed to build fallback HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn handle_response_errors(response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(DiagnosError::FallbackUnavailable(format!(
            "fallback service error: {status}"
        )))
    }
}

#[async_trait]
impl FallbackService for HttpFallback {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, model: &str, data: &Value) -> Result<FallbackPrediction> {
        let url = format!("{}/predict", self.base_url);
        debug!(%url, model, "calling fallback service");

        let response = self
            .http
            .post(&url)
            .json(&FallbackRequest { model, data })
            .send()
            .await
            .map_err(|e| DiagnosError::FallbackUnavailable(e.to_string()))?;

        Self::handle_response_errors(&response)?;

        response.json().await.map_err(|e| {
            DiagnosError::FallbackUnavailable(format!("malformed fallback response: {e}"))
        })
    }
}

impl std::fmt::Debug for HttpFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFallback")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let client = HttpFallback::new("http://localhost:5001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001");
    }

    #[test]
    fn response_parses_minimal_body() {
        let parsed: FallbackPrediction =
            serde_json::from_str(r#"{"prediction": "Flu", "timestamp": "x"}"#).unwrap();
        assert_eq!(parsed.prediction, crate::types::Prediction::Label("Flu".into()));
        assert!(parsed.probabilities.is_none());
    }

    #[test]
    fn response_without_prediction_is_malformed() {
        let parsed = serde_json::from_str::<FallbackPrediction>(r#"{"error": "boom"}"#);
        assert!(parsed.is_err());
    }
}
