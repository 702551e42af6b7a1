//! Diagnos - Disease-risk prediction service over ONNX models
//!
//! This crate serves a family of pre-trained classifiers (diabetes, heart
//! disease, Parkinson's, symptom-based diagnosis) behind one prediction call.
//! Requests name a model by key; the [`Predictor`] looks the key up in the
//! model manifest, encodes the payload into the model's input vector, runs
//! the cached ONNX session, and falls back to a remote prediction service
//! when in-process inference fails.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use diagnos::{HttpFallback, ManifestRegistry, OnnxSessionLoader, Predictor, SymptomCatalog};
//!
//! #[tokio::main]
//! async fn main() -> diagnos::Result<()> {
//!     let manifest = ManifestRegistry::new(
//!         "models/models_manifest.json",
//!         "models",
//!         Arc::new(SymptomCatalog::builtin()),
//!     );
//!
//!     let predictor = Predictor::builder()
//!         .manifest(Arc::new(manifest))
//!         .loader(Arc::new(OnnxSessionLoader::default()))
//!         .fallback(Arc::new(HttpFallback::new("http://localhost:5001")?))
//!         .build()?;
//!
//!     let result = predictor
//!         .predict("heart", &serde_json::json!({ "age": 63, "sex": 1, "cp": 3 }))
//!         .await?;
//!
//!     println!("{:?} via {}", result.prediction, result.source.as_str());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fallback;
pub mod features;
pub mod inference;
pub mod manifest;
pub mod predictor;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use error::{DiagnosError, Result};
pub use fallback::{FallbackPrediction, FallbackService, HttpFallback};
pub use features::{FeatureEncoder, FeatureVector, SymptomCatalog};
pub use manifest::{ManifestRegistry, ModelDescriptor, ModelFamily};
pub use predictor::{Predictor, PredictorBuilder};
pub use session::{Device, InferenceSession, SessionCache, SessionLoader};
#[cfg(feature = "onnx")]
pub use session::{OnnxSession, OnnxSessionLoader};
pub use types::{
    Endpoints, ErrorBody, ErrorDetails, ModelInfo, ModelListing, PredictRequest, Prediction,
    PredictionResult, Source,
};
pub use version::{PKG_VERSION, version_string};
