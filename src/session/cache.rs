//! Session cache with at-most-one load per model key.
//!
//! Sessions are built lazily on first request and kept for the lifetime of
//! the cache. Concurrent requests for the same uncached key wait on a single
//! load; failed loads are not cached, so the next request tries again.

use std::sync::Arc;
use std::time::Instant;

use moka::future::Cache;
use tracing::{info, warn};

use super::{InferenceSession, SessionLoader};
use crate::error::{DiagnosError, Result};
use crate::manifest::ManifestRegistry;
use crate::telemetry;

/// Process-wide mapping from model key to loaded [`InferenceSession`].
pub struct SessionCache {
    manifest: Arc<ManifestRegistry>,
    loader: Arc<dyn SessionLoader>,
    sessions: Cache<String, Arc<dyn InferenceSession>>,
}

impl SessionCache {
    /// Create an empty cache that loads through `loader`.
    pub fn new(manifest: Arc<ManifestRegistry>, loader: Arc<dyn SessionLoader>) -> Self {
        // Unbounded and without expiry: sessions live until the cache is dropped.
        let sessions = Cache::builder().name("diagnos-sessions").build();
        Self {
            manifest,
            loader,
            sessions,
        }
    }

    /// Get the session for `key`, loading it on first use.
    pub async fn get(&self, key: &str) -> Result<Arc<dyn InferenceSession>> {
        if let Some(session) = self.sessions.get(key).await {
            return Ok(session);
        }

        self.sessions
            .try_get_with(key.to_string(), self.load(key))
            .await
            .map_err(|e: Arc<DiagnosError>| (*e).clone())
    }

    /// Load a model ahead of its first request.
    pub async fn preload(&self, key: &str) -> Result<()> {
        let _ = self.get(key).await?;
        Ok(())
    }

    /// Whether a session for `key` is loaded.
    pub fn contains(&self, key: &str) -> bool {
        self.sessions.contains_key(key)
    }

    /// Keys of loaded sessions, sorted.
    pub fn loaded_models(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sessions.iter().map(|(k, _)| (*k).clone()).collect();
        keys.sort();
        keys
    }

    pub fn manifest(&self) -> &Arc<ManifestRegistry> {
        &self.manifest
    }

    async fn load(&self, key: &str) -> Result<Arc<dyn InferenceSession>> {
        let start = Instant::now();
        let result = self.load_uncached(key).await;
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::SESSION_LOADS_TOTAL,
            "model" => key.to_string(),
            "status" => status,
        )
        .increment(1);

        match &result {
            Ok(_) => info!(
                model = key,
                backend = self.loader.name(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "session loaded"
            ),
            Err(e) => warn!(model = key, error = %e, "session load failed"),
        }
        result
    }

    async fn load_uncached(&self, key: &str) -> Result<Arc<dyn InferenceSession>> {
        let descriptor = self.manifest.resolve(key).await?;
        info!(model = key, path = %descriptor.artifact_path.display(), "loading session");

        let artifact = tokio::fs::read(&descriptor.artifact_path)
            .await
            .map_err(|e| {
                DiagnosError::artifact_load(
                    key,
                    format!("cannot read {}: {e}", descriptor.artifact_path.display()),
                )
            })?;

        let loader = Arc::clone(&self.loader);
        tokio::task::spawn_blocking(move || loader.load(&descriptor, artifact))
            .await
            .map_err(|e| DiagnosError::artifact_load(key, format!("load task failed: {e}")))?
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("loader", &self.loader.name())
            .field("loaded", &self.loaded_models())
            .finish()
    }
}
