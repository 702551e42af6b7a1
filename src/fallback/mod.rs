//! Remote fallback prediction service.
//!
//! When in-process inference fails, the same `(model, data)` request is
//! forwarded once to an external prediction service. Implementations report
//! every failure (transport, status, body) as `FallbackUnavailable`.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::types::Prediction;

pub use http::HttpFallback;

/// Prediction as returned by a fallback service.
///
/// Only `prediction` is required; other fields the service sends are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPrediction {
    pub prediction: Prediction,
    #[serde(default)]
    pub probabilities: Option<Vec<f32>>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// A second-opinion prediction service.
#[async_trait]
pub trait FallbackService: Send + Sync {
    /// Service name for logging/debugging.
    fn name(&self) -> &str;

    /// Predict `model` for `data`. A single attempt; no retries.
    async fn predict(&self, model: &str, data: &Value) -> Result<FallbackPrediction>;
}
