//! Diagnos error types

/// Diagnos error types
///
/// `Clone` so that a failed session load can be handed to every caller
/// that was waiting on the same load.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiagnosError {
    // Configuration errors
    /// Manifest unreadable or malformed, or invalid service configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    // Per-request errors
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Model artifact could not be read or parsed. Never cached.
    #[error("failed to load model '{model}': {message}")]
    ArtifactLoad { model: String, message: String },

    #[error("inference failed for model '{model}': {message}")]
    Inference { model: String, message: String },

    // Remote fallback errors
    #[error("fallback service unavailable: {0}")]
    FallbackUnavailable(String),

    /// Both the primary path and the fallback failed.
    #[error("all prediction services failed (primary: {primary}; fallback: {fallback})")]
    Aggregate { primary: String, fallback: String },
}

impl DiagnosError {
    /// Create an artifact load error for `model`.
    pub fn artifact_load(model: impl Into<String>, message: impl ToString) -> Self {
        Self::ArtifactLoad {
            model: model.into(),
            message: message.to_string(),
        }
    }

    /// Create an inference error for `model`.
    pub fn inference(model: impl Into<String>, message: impl ToString) -> Self {
        Self::Inference {
            model: model.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error means the requested model key is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ModelNotFound(_))
    }

    /// Whether a primary-path failure of this kind should be retried on the
    /// fallback service.
    ///
    /// Unknown keys and malformed requests are reported directly; everything
    /// else (configuration, artifact, inference) goes to the fallback.
    pub fn triggers_fallback(&self) -> bool {
        !matches!(
            self,
            Self::ModelNotFound(_) | Self::InvalidInput(_) | Self::Aggregate { .. }
        )
    }
}

/// Result type alias for Diagnos operations
pub type Result<T> = std::result::Result<T, DiagnosError>;
