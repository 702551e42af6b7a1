//! Model descriptors and the manifest file format.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiagnosError, Result};
use crate::features::{SymptomCatalog, builtin_feature_names};

/// Tensor name the exporter gives the model input.
pub const DEFAULT_INPUT_NAME: &str = "input";

/// Key of the symptom model when a manifest entry does not name its family.
pub const SYMPTOM_MODEL_KEY: &str = "decision_tree";

/// How a model's input vector is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Named numeric fields in a declared order.
    Clinical,
    /// Binary presence vector over the symptom catalog.
    Symptoms,
}

impl ModelFamily {
    /// Family to assume for a key whose manifest entry omits it.
    pub fn infer(key: &str) -> Self {
        if key == SYMPTOM_MODEL_KEY {
            Self::Symptoms
        } else {
            Self::Clinical
        }
    }
}

/// Immutable description of one servable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Unique short name (e.g. "diabetes").
    pub key: String,
    /// Backing artifact, resolved against the models directory.
    pub artifact_path: PathBuf,
    /// Length of the input vector the artifact expects.
    pub feature_count: usize,
    /// Field order for clinical models. Never longer than `feature_count`.
    pub feature_names: Option<Vec<String>>,
    pub family: ModelFamily,
    /// Input tensor name.
    pub input_name: String,
    /// Output tensor to read; the first output when `None`.
    pub output_name: Option<String>,
}

impl ModelDescriptor {
    /// Descriptor for a clinical-field model.
    pub fn clinical<I, S>(
        key: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
        feature_count: usize,
        feature_names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            artifact_path: artifact_path.into(),
            feature_count,
            feature_names: Some(feature_names.into_iter().map(Into::into).collect()),
            family: ModelFamily::Clinical,
            input_name: DEFAULT_INPUT_NAME.to_string(),
            output_name: None,
        }
    }

    /// Descriptor for a symptom-list model.
    pub fn symptoms(
        key: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
        feature_count: usize,
    ) -> Self {
        Self {
            key: key.into(),
            artifact_path: artifact_path.into(),
            feature_count,
            feature_names: None,
            family: ModelFamily::Symptoms,
            input_name: DEFAULT_INPUT_NAME.to_string(),
            output_name: None,
        }
    }

    /// Declared field order, empty for symptom models.
    pub fn feature_order(&self) -> &[String] {
        self.feature_names.as_deref().unwrap_or(&[])
    }
}

/// On-disk manifest, as written by the model export step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub models: Vec<ManifestEntry>,
}

/// One model in the manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub key: String,
    /// Artifact file, relative to the models directory unless absolute.
    pub file: PathBuf,
    /// Expected input length. The exporter writes `null` when unknown.
    #[serde(default)]
    pub n_features: Option<usize>,
    #[serde(default, alias = "featureNames")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub family: Option<ModelFamily>,
    #[serde(default)]
    pub input_name: Option<String>,
    #[serde(default)]
    pub output_name: Option<String>,
}

impl Manifest {
    /// Parse a manifest document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DiagnosError::Configuration(format!("Malformed model manifest: {e}")))
    }
}

impl ManifestEntry {
    /// Validate this entry and resolve it into a descriptor.
    ///
    /// Fills in the family, the clinical field order, and a missing feature
    /// count from built-in defaults.
    pub fn resolve(self, models_dir: &Path, catalog: &SymptomCatalog) -> Result<ModelDescriptor> {
        let key = self.key;
        if key.trim().is_empty() {
            return Err(DiagnosError::Configuration(
                "Manifest entry with empty key".to_string(),
            ));
        }

        let family = self.family.unwrap_or_else(|| ModelFamily::infer(&key));

        let feature_names = match family {
            ModelFamily::Clinical => {
                let names = self.feature_names.or_else(|| {
                    builtin_feature_names(&key)
                        .map(|names| names.iter().map(|n| n.to_string()).collect())
                });
                match names {
                    Some(names) if !names.is_empty() => Some(names),
                    _ => {
                        return Err(DiagnosError::Configuration(format!(
                            "Clinical model '{key}' has no feature names"
                        )));
                    }
                }
            }
            ModelFamily::Symptoms => None,
        };

        let default_count = match &feature_names {
            Some(names) => names.len(),
            None => catalog.len(),
        };
        let feature_count = self.n_features.unwrap_or(default_count);
        if feature_count == 0 {
            return Err(DiagnosError::Configuration(format!(
                "Model '{key}' declares zero features"
            )));
        }

        if let Some(names) = &feature_names
            && names.len() > feature_count
        {
            return Err(DiagnosError::Configuration(format!(
                "Model '{key}' lists {} feature names but expects {feature_count} features",
                names.len()
            )));
        }

        let artifact_path = if self.file.is_absolute() {
            self.file
        } else {
            models_dir.join(self.file)
        };

        Ok(ModelDescriptor {
            key,
            artifact_path,
            feature_count,
            feature_names,
            family,
            input_name: self
                .input_name
                .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string()),
            output_name: self.output_name,
        })
    }
}
