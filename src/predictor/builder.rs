//! Builder for configuring predictor instances

use std::sync::Arc;

use super::Predictor;
use crate::fallback::FallbackService;
use crate::features::FeatureEncoder;
use crate::manifest::ManifestRegistry;
use crate::session::{SessionCache, SessionLoader};
use crate::{DiagnosError, Result};

/// Builder for configuring predictor instances.
#[derive(Default)]
pub struct PredictorBuilder {
    manifest: Option<Arc<ManifestRegistry>>,
    loader: Option<Arc<dyn SessionLoader>>,
    fallback: Option<Arc<dyn FallbackService>>,
}

impl PredictorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manifest registry to resolve model keys against (required).
    pub fn manifest(mut self, manifest: Arc<ManifestRegistry>) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Backend that turns artifacts into sessions (required).
    pub fn loader(mut self, loader: Arc<dyn SessionLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Remote service to try when in-process inference fails.
    pub fn fallback(mut self, service: Arc<dyn FallbackService>) -> Self {
        self.fallback = Some(service);
        self
    }

    /// Build the predictor.
    ///
    /// The feature encoder shares the manifest's symptom catalog.
    pub fn build(self) -> Result<Predictor> {
        let manifest = self
            .manifest
            .ok_or_else(|| DiagnosError::Configuration("No model manifest configured".into()))?;
        let loader = self
            .loader
            .ok_or_else(|| DiagnosError::Configuration("No session loader configured".into()))?;

        let encoder = FeatureEncoder::new(Arc::clone(manifest.catalog()));
        let sessions = SessionCache::new(Arc::clone(&manifest), loader);

        Ok(Predictor {
            manifest,
            sessions,
            encoder,
            fallback: self.fallback,
        })
    }
}
