//! Model listing types.
//!
//! What clients need to build an input form for each served model.

use serde::{Deserialize, Serialize};

use crate::features::SymptomCatalog;
use crate::manifest::{ModelDescriptor, ModelFamily};

/// Information about one servable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub key: String,
    pub n_features: usize,
    /// Field order for clinical models.
    #[serde(rename = "featureNames")]
    pub feature_names: Option<Vec<String>>,
    /// Symptom catalog for the symptom model.
    pub symptoms: Option<Vec<String>>,
}

impl ModelInfo {
    pub fn from_descriptor(descriptor: &ModelDescriptor, catalog: &SymptomCatalog) -> Self {
        let symptoms = match descriptor.family {
            ModelFamily::Symptoms => Some(catalog.symptoms().to_vec()),
            ModelFamily::Clinical => None,
        };
        Self {
            key: descriptor.key.clone(),
            n_features: descriptor.feature_count,
            feature_names: descriptor.feature_names.clone(),
            symptoms,
        }
    }
}

/// Endpoint summary included in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub predict: String,
    pub models: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            predict: "POST /api/predict".to_string(),
            models: "GET /api/predict".to_string(),
        }
    }
}

/// Response of the model listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelListing {
    #[serde(rename = "availableModels")]
    pub available_models: Vec<ModelInfo>,
    pub endpoints: Endpoints,
}
