//! Prediction and error response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DiagnosError;

/// What a model predicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    /// Index of the most probable class.
    Class(usize),
    /// A single model output (label or regression value).
    Value(f32),
    /// A named label, as returned by some fallback services.
    Label(String),
}

/// Which path served a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// In-process inference.
    Primary,
    /// The remote fallback service.
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Primary => "primary",
            Source::Fallback => "fallback",
        }
    }
}

/// A successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub model: String,
    pub prediction: Prediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub source: Source,
    pub timestamp: DateTime<Utc>,
}

/// Both underlying causes of a double failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub primary: String,
    pub fallback: String,
}

/// Failure response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl From<&DiagnosError> for ErrorBody {
    fn from(err: &DiagnosError) -> Self {
        match err {
            DiagnosError::Aggregate { primary, fallback } => Self {
                error: "All prediction services failed".to_string(),
                details: Some(ErrorDetails {
                    primary: primary.clone(),
                    fallback: fallback.clone(),
                }),
            },
            DiagnosError::ModelNotFound(key) => Self::new(format!("Model {key} not found")),
            DiagnosError::InvalidInput(msg) => Self::new(msg.clone()),
            other => Self::new(other.to_string()),
        }
    }
}
