//! Route handlers.
//!
//! | Method | Path           | Handler   |
//! |--------|----------------|-----------|
//! | POST   | `/api/predict` | `predict` |
//! | GET    | `/api/predict` | `models`  |
//! | GET    | `/health`      | `health`  |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{ErrorBody, PredictRequest};
use crate::{DiagnosError, PKG_VERSION, Predictor};

/// Service name reported by `/health`.
const SERVICE_NAME: &str = "diagnos";

/// Build the application router.
pub fn router(predictor: Arc<Predictor>) -> Router {
    Router::new()
        .route("/api/predict", get(models).post(predict))
        .route("/health", get(health))
        .with_state(predictor)
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// A [`DiagnosError`] rendered as a JSON error response.
pub struct ApiError(DiagnosError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DiagnosError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DiagnosError::ModelNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DiagnosError> for ApiError {
    fn from(err: DiagnosError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::from(&self.0))).into_response()
    }
}

async fn predict(
    State(predictor): State<Arc<Predictor>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|e| {
        debug!(error = %e, "rejected prediction body");
        DiagnosError::InvalidInput("Missing required fields: model and data".to_string())
    })?;
    request.validate()?;

    let result = predictor.predict(&request.model, &request.data).await?;
    info!(model = %result.model, source = result.source.as_str(), "prediction served");
    Ok(Json(result))
}

async fn models(State(predictor): State<Arc<Predictor>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(predictor.listing().await?))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: PKG_VERSION.to_string(),
        timestamp: Utc::now(),
    })
}
