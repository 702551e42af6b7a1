//! Inbound prediction request

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DiagnosError, Result};

/// `{ model, data }` as posted by clients.
///
/// Both fields default so that a missing field is reported as invalid input
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub data: Value,
}

impl PredictRequest {
    pub fn new(model: impl Into<String>, data: Value) -> Self {
        Self {
            model: model.into(),
            data,
        }
    }

    /// Reject requests without a model key or without data.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() || self.data.is_null() {
            return Err(DiagnosError::InvalidInput(
                "Missing required fields: model and data".to_string(),
            ));
        }
        Ok(())
    }
}
