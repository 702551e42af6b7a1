//! Telemetry metric name constants.
//!
//! Centralised metric names for diagnos operations. The daemon or an
//! embedding application installs its own `metrics` recorder; without one,
//! all metric calls are no-ops.
//!
//! # Common labels
//!
//! - `model`: model key (e.g. "diabetes", "decision_tree")
//! - `source`: which path answered, "primary" or "fallback"
//! - `status`: outcome, "ok" or "error"

/// Total predictions served or failed.
///
/// Labels: `model`, `source` ("primary" | "fallback"), `status` ("ok" | "error").
/// A request answered by the fallback is counted once, with `source = "fallback"`.
pub const PREDICTIONS_TOTAL: &str = "diagnos_predictions_total";

/// End-to-end prediction duration in seconds, fallback included.
///
/// Labels: `model`.
pub const PREDICTION_DURATION_SECONDS: &str = "diagnos_prediction_duration_seconds";

/// Session load attempts. Cache hits are not counted.
///
/// Labels: `model`, `status`.
pub const SESSION_LOADS_TOTAL: &str = "diagnos_session_loads_total";

/// Calls made to the remote fallback service.
///
/// Labels: `model`, `status`.
pub const FALLBACK_ATTEMPTS_TOTAL: &str = "diagnos_fallback_attempts_total";
