//! Inference sessions and their process-wide cache.

pub mod cache;
pub mod device;
#[cfg(feature = "onnx")]
pub mod onnx;

use std::sync::Arc;

use crate::Result;
use crate::features::FeatureVector;
use crate::manifest::ModelDescriptor;

pub use cache::SessionCache;
pub use device::Device;
#[cfg(feature = "onnx")]
pub use onnx::{OnnxSession, OnnxSessionLoader};

/// A loaded, ready-to-run model.
///
/// Sessions are shared between concurrent requests; `run` must not change
/// anything a later call can observe.
pub trait InferenceSession: Send + Sync {
    /// Run a forward pass on a single input row and return the flattened
    /// first output.
    fn run(&self, input: &FeatureVector) -> Result<Vec<f32>>;
}

/// Builds sessions from artifact bytes.
pub trait SessionLoader: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Construct a session for `descriptor` from its artifact.
    ///
    /// Fails with `ArtifactLoad` when the bytes are not a valid model.
    fn load(&self, descriptor: &ModelDescriptor, artifact: Vec<u8>)
    -> Result<Arc<dyn InferenceSession>>;
}
