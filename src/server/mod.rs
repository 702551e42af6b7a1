//! HTTP front end for the [`Predictor`].
//!
//! This module provides:
//! - The axum router and its handlers (`routes`)
//! - Configuration types (`config`)
//! - Assembly of a predictor from configuration (`build_predictor`, needs `onnx`)

pub mod config;
pub mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{DiagnosError, Predictor, Result};

pub use config::Config;
pub use routes::{HealthStatus, router};

/// Serve `predictor` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, predictor: Arc<Predictor>) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "diagnosd listening");
    }
    axum::serve(listener, router(predictor))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DiagnosError::Configuration(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// Build a [`Predictor`] backed by ONNX Runtime from configuration.
#[cfg(feature = "onnx")]
pub fn build_predictor(config: &Config) -> Result<Predictor> {
    use crate::{Device, HttpFallback, ManifestRegistry, OnnxSessionLoader, SymptomCatalog};

    let manifest = ManifestRegistry::new(
        config.models.manifest_path(),
        &config.models.dir,
        Arc::new(SymptomCatalog::builtin()),
    );
    let device = Device::from_name(&config.models.device)?;

    let mut builder = Predictor::builder()
        .manifest(Arc::new(manifest))
        .loader(Arc::new(OnnxSessionLoader::new(device)));

    if config.fallback.enabled {
        let fallback = HttpFallback::with_timeout(&config.fallback.url, config.fallback.timeout())?;
        builder = builder.fallback(Arc::new(fallback));
    }

    builder.build()
}

/// Load the configured models ahead of traffic.
///
/// Failures are logged and skipped; the model is retried on first request.
pub async fn preload(predictor: &Predictor, keys: &[String]) {
    let loads = keys.iter().map(|key| async move {
        match predictor.preload(key).await {
            Ok(()) => info!(model = %key, "model preloaded"),
            Err(e) => warn!(model = %key, error = %e, "failed to preload model"),
        }
    });
    futures_util::future::join_all(loads).await;
}
