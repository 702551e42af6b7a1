//! Inference execution and output interpretation.

pub mod output;

use std::sync::Arc;

use tracing::debug;

use crate::error::{DiagnosError, Result};
use crate::features::FeatureVector;
use crate::manifest::ModelDescriptor;
use crate::session::InferenceSession;

pub use output::{Interpretation, RawOutput, interpret};

/// Run one forward pass on the blocking pool.
///
/// The vector must match the descriptor's feature count; a mismatch is an
/// `Inference` error and the session is not called.
pub async fn run(
    descriptor: &ModelDescriptor,
    session: Arc<dyn InferenceSession>,
    vector: FeatureVector,
) -> Result<RawOutput> {
    let model = descriptor.key.clone();
    if vector.len() != descriptor.feature_count {
        return Err(DiagnosError::inference(
            model,
            format!(
                "input has {} features, model expects {}",
                vector.len(),
                descriptor.feature_count
            ),
        ));
    }

    let values = tokio::task::spawn_blocking({
        let model = model.clone();
        move || {
            debug!(model = %model, features = vector.len(), "running inference");
            session.run(&vector)
        }
    })
    .await
    .map_err(|e| DiagnosError::inference(&model, format!("inference task failed: {e}")))??;

    RawOutput::from_values(&model, values)
}
