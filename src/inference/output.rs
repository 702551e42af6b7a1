//! Raw model output and its interpretation.

use chrono::Utc;

use crate::error::{DiagnosError, Result};
use crate::types::{Prediction, PredictionResult, Source};

/// Model output, classified once by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// A single value: a label or a regression output.
    Scalar(f32),
    /// A class-probability distribution.
    Distribution(Vec<f32>),
}

impl RawOutput {
    /// Classify a flat output tensor.
    ///
    /// Empty outputs and NaN values are runtime faults of the model.
    pub fn from_values(model: &str, values: Vec<f32>) -> Result<Self> {
        if values.iter().any(|v| v.is_nan()) {
            return Err(DiagnosError::inference(model, "model produced NaN output"));
        }
        match values.as_slice() {
            [] => Err(DiagnosError::inference(model, "model produced an empty output")),
            [value] => Ok(Self::Scalar(*value)),
            _ => Ok(Self::Distribution(values)),
        }
    }
}

/// A normalized prediction, before it is tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub prediction: Prediction,
    pub probabilities: Option<Vec<f32>>,
    pub confidence: Option<f32>,
}

impl Interpretation {
    /// Tag with the model key and serving path, timestamped now.
    pub fn into_result(self, model: impl Into<String>, source: Source) -> PredictionResult {
        PredictionResult {
            model: model.into(),
            prediction: self.prediction,
            probabilities: self.probabilities,
            confidence: self.confidence,
            source,
            timestamp: Utc::now(),
        }
    }
}

/// Interpret raw output.
///
/// A scalar is the prediction itself. A distribution predicts the index of
/// its maximum (first occurrence on ties) with that maximum as confidence.
pub fn interpret(raw: RawOutput) -> Interpretation {
    match raw {
        RawOutput::Scalar(value) => Interpretation {
            prediction: Prediction::Value(value),
            probabilities: None,
            confidence: None,
        },
        RawOutput::Distribution(probabilities) => {
            let (index, confidence) = argmax(&probabilities);
            Interpretation {
                prediction: Prediction::Class(index),
                probabilities: Some(probabilities),
                confidence: Some(confidence),
            }
        }
    }
}

fn argmax(values: &[f32]) -> (usize, f32) {
    let mut best = (0, f32::NEG_INFINITY);
    for (i, &v) in values.iter().enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}
