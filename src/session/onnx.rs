//! Local inference via ONNX Runtime.
//!
//! Models are exported from scikit-learn with a single `[batch, n_features]`
//! float input. Classifier exports put the predicted label (an `i64` tensor)
//! first; regressors and probability-only exports produce `f32`.

use std::sync::{Arc, Mutex};

use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::{DynValue, TensorRef};

use super::{Device, InferenceSession, SessionLoader};
use crate::error::{DiagnosError, Result};
use crate::features::FeatureVector;
use crate::manifest::ModelDescriptor;

/// Builds ONNX Runtime sessions from in-memory model bytes.
#[derive(Debug, Clone, Default)]
pub struct OnnxSessionLoader {
    device: Device,
}

impl OnnxSessionLoader {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> Device {
        self.device
    }
}

impl SessionLoader for OnnxSessionLoader {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load(
        &self,
        descriptor: &ModelDescriptor,
        artifact: Vec<u8>,
    ) -> Result<Arc<dyn InferenceSession>> {
        let session = build_session(&descriptor.key, &artifact, &self.device)?;
        Ok(Arc::new(OnnxSession {
            model: descriptor.key.clone(),
            session: Mutex::new(session),
            input_name: descriptor.input_name.clone(),
            output_name: descriptor.output_name.clone(),
        }))
    }
}

/// One loaded ONNX model.
///
/// `ort` needs exclusive access to run a session, so calls on the same model
/// are serialized.
pub struct OnnxSession {
    model: String,
    session: Mutex<Session>,
    input_name: String,
    output_name: Option<String>,
}

impl InferenceSession for OnnxSession {
    fn run(&self, input: &FeatureVector) -> Result<Vec<f32>> {
        let shape = [1_usize, input.len()];
        let tensor = TensorRef::from_array_view((shape, input.as_slice())).map_err(|e| {
            DiagnosError::inference(&self.model, format!("Failed to create input tensor: {e}"))
        })?;

        let mut session = self.session.lock().map_err(|e| {
            DiagnosError::inference(&self.model, format!("Session lock poisoned: {e}"))
        })?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| DiagnosError::inference(&self.model, format!("ONNX inference failed: {e}")))?;

        let values = match &self.output_name {
            Some(name) => {
                let output = outputs.get(name.as_str()).ok_or_else(|| {
                    DiagnosError::inference(&self.model, format!("No output named '{name}'"))
                })?;
                extract_values(output)
            }
            None => extract_values(&outputs[0]),
        };
        values.map_err(|e| DiagnosError::inference(&self.model, e))
    }
}

/// Flatten a numeric output tensor to `f32`.
fn extract_values(value: &DynValue) -> std::result::Result<Vec<f32>, String> {
    if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
        return Ok(data.to_vec());
    }
    if let Ok((_, data)) = value.try_extract_tensor::<i64>() {
        return Ok(data.iter().map(|&v| v as f32).collect());
    }
    if let Ok((_, data)) = value.try_extract_tensor::<f64>() {
        return Ok(data.iter().map(|&v| v as f32).collect());
    }
    Err("Output is not an f32, f64 or i64 tensor".to_string())
}

/// Build an ONNX session with the appropriate execution provider.
fn build_session(model: &str, bytes: &[u8], device: &Device) -> Result<Session> {
    let builder = Session::builder()
        .map_err(|e| {
            DiagnosError::artifact_load(model, format!("Failed to create session builder: {e}"))
        })?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| {
            DiagnosError::artifact_load(model, format!("Failed to set optimization level: {e}"))
        })?;

    // Configure execution provider based on device
    let builder = match device {
        Device::Cpu => builder,
        #[cfg(feature = "cuda")]
        Device::Cuda { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder
                .with_execution_providers([CUDAExecutionProvider::default()
                    .with_device_id(*device_id as i32)
                    .build()])
                .map_err(|e| {
                    DiagnosError::artifact_load(model, format!("Failed to configure CUDA: {e}"))
                })?
        }
    };

    builder
        .commit_from_memory(bytes)
        .map_err(|e| DiagnosError::artifact_load(model, format!("Failed to load ONNX model: {e}")))
}
