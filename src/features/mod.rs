//! Feature encoding: named request payloads to fixed-length model inputs.
//!
//! Each model family has its own [`FeatureSource`]:
//! - [`ClinicalFields`] reads named numeric fields in the descriptor's order
//! - [`SymptomList`] builds a binary presence vector over the [`SymptomCatalog`]
//!
//! [`FeatureEncoder`] picks the source from the descriptor's family. Encoding
//! never fails: absent or unusable values become `0.0`.

pub mod catalog;
pub mod clinical;
pub mod symptom;

use std::sync::Arc;

use serde_json::Value;

use crate::manifest::{ModelDescriptor, ModelFamily};

pub use catalog::{SymptomCatalog, builtin_feature_names};
pub use clinical::ClinicalFields;
pub use symptom::SymptomList;

/// Ordered, fixed-length model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// All-zero vector of `len` features.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// A request payload that can be laid out as a model input vector.
pub trait FeatureSource {
    /// Build a vector of exactly `descriptor.feature_count` values.
    fn to_vector(&self, descriptor: &ModelDescriptor) -> FeatureVector;
}

/// Selects and applies the [`FeatureSource`] for a model's family.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    catalog: Arc<SymptomCatalog>,
}

impl FeatureEncoder {
    pub fn new(catalog: Arc<SymptomCatalog>) -> Self {
        Self { catalog }
    }

    /// The symptom catalog used for symptom-family models.
    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    /// Encode `payload` for the model described by `descriptor`.
    pub fn encode(&self, descriptor: &ModelDescriptor, payload: &Value) -> FeatureVector {
        let vector = match descriptor.family {
            ModelFamily::Clinical => ClinicalFields::new(payload).to_vector(descriptor),
            ModelFamily::Symptoms => {
                SymptomList::from_payload(payload, &self.catalog).to_vector(descriptor)
            }
        };
        debug_assert_eq!(vector.len(), descriptor.feature_count);
        vector
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(Arc::new(SymptomCatalog::builtin()))
    }
}
