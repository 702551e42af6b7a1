//! Named clinical fields.

use serde_json::Value;

use super::{FeatureSource, FeatureVector};
use crate::manifest::ModelDescriptor;

/// Clinical payload: an object of named measurements.
///
/// Position `i` of the output is `payload[feature_names[i]]` coerced to `f32`.
/// Missing, non-numeric, or non-finite values become `0.0` without error;
/// no range validation happens here.
#[derive(Debug, Clone, Copy)]
pub struct ClinicalFields<'a> {
    payload: &'a Value,
}

impl<'a> ClinicalFields<'a> {
    pub fn new(payload: &'a Value) -> Self {
        Self { payload }
    }

    /// Coerced value of one named field.
    pub fn value(&self, name: &str) -> f32 {
        self.payload.get(name).map(coerce).unwrap_or(0.0)
    }
}

impl FeatureSource for ClinicalFields<'_> {
    fn to_vector(&self, descriptor: &ModelDescriptor) -> FeatureVector {
        let mut values = vec![0.0; descriptor.feature_count];
        for (slot, name) in values.iter_mut().zip(descriptor.feature_order()) {
            *slot = self.value(name);
        }
        FeatureVector::from(values)
    }
}

fn coerce(value: &Value) -> f32 {
    let v = match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    v.filter(|f| f.is_finite()).unwrap_or(0.0)
}
