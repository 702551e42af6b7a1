//! Lazily loaded, read-only manifest registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{Manifest, ModelDescriptor};
use crate::error::{DiagnosError, Result};
use crate::features::SymptomCatalog;

/// Validated descriptors, in manifest order.
#[derive(Debug, Default)]
struct Descriptors {
    ordered: Vec<Arc<ModelDescriptor>>,
    by_key: HashMap<String, usize>,
}

impl Descriptors {
    fn build(manifest: Manifest, models_dir: &Path, catalog: &SymptomCatalog) -> Result<Self> {
        let mut descriptors = Self::default();
        for entry in manifest.models {
            let descriptor = entry.resolve(models_dir, catalog)?;
            if descriptors.by_key.contains_key(&descriptor.key) {
                return Err(DiagnosError::Configuration(format!(
                    "Duplicate model key in manifest: {}",
                    descriptor.key
                )));
            }
            descriptors
                .by_key
                .insert(descriptor.key.clone(), descriptors.ordered.len());
            descriptors.ordered.push(Arc::new(descriptor));
        }
        Ok(descriptors)
    }
}

/// Process-wide mapping from model key to [`ModelDescriptor`].
///
/// The manifest file is read on first use and cached for the lifetime of the
/// registry. A failed read is not cached; the next call tries again.
pub struct ManifestRegistry {
    manifest_path: Option<PathBuf>,
    models_dir: PathBuf,
    catalog: Arc<SymptomCatalog>,
    descriptors: OnceCell<Descriptors>,
}

impl ManifestRegistry {
    /// Registry backed by a manifest file, read lazily.
    ///
    /// Relative artifact paths resolve against `models_dir`.
    pub fn new(
        manifest_path: impl Into<PathBuf>,
        models_dir: impl Into<PathBuf>,
        catalog: Arc<SymptomCatalog>,
    ) -> Self {
        Self {
            manifest_path: Some(manifest_path.into()),
            models_dir: models_dir.into(),
            catalog,
            descriptors: OnceCell::new(),
        }
    }

    /// Registry over an already parsed manifest. Validates eagerly.
    pub fn from_manifest(
        manifest: Manifest,
        models_dir: impl Into<PathBuf>,
        catalog: Arc<SymptomCatalog>,
    ) -> Result<Self> {
        let models_dir = models_dir.into();
        let descriptors = Descriptors::build(manifest, &models_dir, &catalog)?;
        Ok(Self {
            manifest_path: None,
            models_dir,
            catalog,
            descriptors: OnceCell::new_with(Some(descriptors)),
        })
    }

    /// Resolve a model key to its descriptor.
    ///
    /// Fails with `Configuration` if the manifest cannot be loaded and with
    /// `ModelNotFound` if no entry has this key.
    pub async fn resolve(&self, key: &str) -> Result<Arc<ModelDescriptor>> {
        let descriptors = self.descriptors().await?;
        descriptors
            .by_key
            .get(key)
            .map(|&i| Arc::clone(&descriptors.ordered[i]))
            .ok_or_else(|| DiagnosError::ModelNotFound(key.to_string()))
    }

    /// All descriptors in manifest order.
    pub async fn all(&self) -> Result<Vec<Arc<ModelDescriptor>>> {
        Ok(self.descriptors().await?.ordered.clone())
    }

    /// All model keys in manifest order.
    pub async fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .descriptors()
            .await?
            .ordered
            .iter()
            .map(|d| d.key.clone())
            .collect())
    }

    /// Whether the manifest has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.descriptors.initialized()
    }

    /// The symptom catalog descriptors were resolved against.
    pub fn catalog(&self) -> &Arc<SymptomCatalog> {
        &self.catalog
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    async fn descriptors(&self) -> Result<&Descriptors> {
        self.descriptors.get_or_try_init(|| self.load()).await
    }

    async fn load(&self) -> Result<Descriptors> {
        let path = self.manifest_path.as_ref().ok_or_else(|| {
            DiagnosError::Configuration("No model manifest configured".to_string())
        })?;

        debug!(path = %path.display(), "reading model manifest");
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DiagnosError::Configuration(format!(
                "Failed to read model manifest {}: {e}",
                path.display()
            ))
        })?;

        let manifest = Manifest::from_json(&content)?;
        let descriptors = Descriptors::build(manifest, &self.models_dir, &self.catalog)?;
        info!(
            path = %path.display(),
            models = descriptors.ordered.len(),
            "model manifest loaded"
        );
        Ok(descriptors)
    }
}

impl std::fmt::Debug for ManifestRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestRegistry")
            .field("manifest_path", &self.manifest_path)
            .field("models_dir", &self.models_dir)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
