//! Prediction coordinator: primary in-process inference with a single
//! remote fallback.
//!
//! # Request Flow
//!
//! ```text
//! predict("heart", data)
//!        │
//!        ▼
//!  ManifestRegistry::resolve ──► ModelNotFound: reported directly
//!        │
//!        ▼
//!  FeatureEncoder ─► SessionCache ─► inference::run ─► interpret
//!        │                                              │
//!        │ any error                                    ▼
//!        ▼                                   Ok(source = primary)
//!  FallbackService::predict (one attempt)
//!        │
//!        ├──► Ok(source = fallback)
//!        └──► Aggregate { primary, fallback }
//! ```
//!
//! There is no circuit breaker: every request tries primary, then fallback.

mod builder;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::error::{DiagnosError, Result};
use crate::fallback::FallbackService;
use crate::features::FeatureEncoder;
use crate::inference::{self, Interpretation};
use crate::manifest::ManifestRegistry;
use crate::session::SessionCache;
use crate::telemetry;
use crate::types::{Endpoints, ModelInfo, ModelListing, PredictionResult, Source};

pub use builder::PredictorBuilder;

/// Serves predictions for every model in the manifest.
///
/// Owns the long-lived manifest registry and session cache; share it behind
/// an `Arc` between request handlers.
pub struct Predictor {
    manifest: Arc<ManifestRegistry>,
    sessions: SessionCache,
    encoder: FeatureEncoder,
    fallback: Option<Arc<dyn FallbackService>>,
}

impl Predictor {
    /// Create a new builder for configuring the predictor.
    pub fn builder() -> PredictorBuilder {
        PredictorBuilder::new()
    }

    /// Predict with `model` for `data`.
    ///
    /// Unknown model keys fail with `ModelNotFound` without any load or
    /// fallback attempt. Any other primary failure is retried once on the
    /// fallback service; if that fails too, both causes are returned in
    /// `Aggregate`.
    #[instrument(skip(self, data), fields(operation = "predict"))]
    pub async fn predict(&self, model: &str, data: &Value) -> Result<PredictionResult> {
        let start = Instant::now();

        let primary_err = match self.predict_primary(model, data).await {
            Ok(result) => {
                record_prediction(model, Source::Primary, start, true);
                return Ok(result);
            }
            Err(e) if !e.triggers_fallback() => {
                record_prediction(model, Source::Primary, start, false);
                return Err(e);
            }
            Err(e) => e,
        };

        warn!(model, error = %primary_err, "primary prediction failed, trying fallback");

        match self.predict_fallback(model, data).await {
            Ok(result) => {
                record_prediction(model, Source::Fallback, start, true);
                Ok(result)
            }
            Err(fallback_err) => {
                error!(
                    model,
                    primary = %primary_err,
                    fallback = %fallback_err,
                    "all prediction services failed"
                );
                record_prediction(model, Source::Fallback, start, false);
                Err(DiagnosError::Aggregate {
                    primary: primary_err.to_string(),
                    fallback: fallback_err.to_string(),
                })
            }
        }
    }

    /// Run in-process inference only.
    pub async fn predict_primary(&self, model: &str, data: &Value) -> Result<PredictionResult> {
        let descriptor = self.manifest.resolve(model).await?;
        let vector = self.encoder.encode(&descriptor, data);
        let session = self.sessions.get(&descriptor.key).await?;
        let raw = inference::run(&descriptor, session, vector).await?;
        Ok(inference::interpret(raw).into_result(model, Source::Primary))
    }

    async fn predict_fallback(&self, model: &str, data: &Value) -> Result<PredictionResult> {
        let Some(service) = &self.fallback else {
            return Err(DiagnosError::FallbackUnavailable(
                "no fallback service configured".to_string(),
            ));
        };

        let result = service.predict(model, data).await;
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::FALLBACK_ATTEMPTS_TOTAL,
            "model" => model.to_owned(),
            "status" => status,
        )
        .increment(1);

        let remote = result?;
        let interpretation = Interpretation {
            prediction: remote.prediction,
            probabilities: remote.probabilities,
            confidence: remote.confidence,
        };
        Ok(interpretation.into_result(model, Source::Fallback))
    }

    /// Every served model with what a client needs to build its input.
    pub async fn listing(&self) -> Result<ModelListing> {
        let catalog = self.encoder.catalog();
        let available_models = self
            .manifest
            .all()
            .await?
            .iter()
            .map(|d| ModelInfo::from_descriptor(d, catalog))
            .collect();
        Ok(ModelListing {
            available_models,
            endpoints: Endpoints::default(),
        })
    }

    /// Load `key` ahead of its first request.
    pub async fn preload(&self, key: &str) -> Result<()> {
        self.sessions.preload(key).await
    }

    pub fn manifest(&self) -> &Arc<ManifestRegistry> {
        &self.manifest
    }

    pub fn sessions(&self) -> &SessionCache {
        &self.sessions
    }

    /// Whether a fallback service is configured.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

fn record_prediction(model: &str, source: Source, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::PREDICTIONS_TOTAL,
        "model" => model.to_owned(),
        "source" => source.as_str(),
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::PREDICTION_DURATION_SECONDS,
        "model" => model.to_owned(),
    )
    .record(start.elapsed().as_secs_f64());
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("manifest", &self.manifest)
            .field("sessions", &self.sessions)
            .field("fallback", &self.fallback.as_ref().map(|s| s.name().to_owned()))
            .finish()
    }
}
