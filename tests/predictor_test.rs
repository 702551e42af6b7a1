//! Integration tests for the primary → fallback prediction flow.
//!
//! The remote fallback is a wiremock server; in-process inference uses fake
//! sessions so no ONNX Runtime is needed.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diagnos::features::FeatureVector;
use diagnos::{
    DiagnosError, HttpFallback, InferenceSession, ManifestRegistry, ModelDescriptor, Prediction,
    Predictor, Result, SessionLoader, Source, SymptomCatalog,
};

// ============================================================================
// Fakes
// ============================================================================

/// Returns fixed output and remembers the last input it saw.
struct RecordingSession {
    output: Vec<f32>,
    last_input: Arc<Mutex<Option<Vec<f32>>>>,
}

impl InferenceSession for RecordingSession {
    fn run(&self, input: &FeatureVector) -> Result<Vec<f32>> {
        *self.last_input.lock().unwrap() = Some(input.as_slice().to_vec());
        Ok(self.output.clone())
    }
}

struct FakeLoader {
    output: Option<Vec<f32>>,
    loads: AtomicUsize,
    last_input: Arc<Mutex<Option<Vec<f32>>>>,
}

impl FakeLoader {
    /// Loads sessions that return `output`.
    fn returning(output: Vec<f32>) -> Self {
        Self {
            output: Some(output),
            loads: AtomicUsize::new(0),
            last_input: Arc::default(),
        }
    }

    /// Fails every load.
    fn broken() -> Self {
        Self {
            output: None,
            loads: AtomicUsize::new(0),
            last_input: Arc::default(),
        }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn last_input(&self) -> Option<Vec<f32>> {
        self.last_input.lock().unwrap().clone()
    }
}

impl SessionLoader for FakeLoader {
    fn name(&self) -> &str {
        "fake"
    }

    fn load(
        &self,
        descriptor: &ModelDescriptor,
        _artifact: Vec<u8>,
    ) -> Result<Arc<dyn InferenceSession>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Some(output) => Ok(Arc::new(RecordingSession {
                output: output.clone(),
                last_input: Arc::clone(&self.last_input),
            })),
            None => Err(DiagnosError::artifact_load(&descriptor.key, "model file is corrupt")),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

const MANIFEST: &str = r#"{"models": [
    {"key": "heart", "file": "heart.onnx", "n_features": 13},
    {"key": "custom", "file": "custom.onnx", "n_features": 2, "feature_names": ["age", "sex"]},
    {"key": "decision_tree", "file": "dt.onnx", "n_features": 3}
]}"#;

fn registry(dir: &Path) -> Arc<ManifestRegistry> {
    let manifest = dir.join("models_manifest.json");
    std::fs::write(&manifest, MANIFEST).unwrap();
    for file in ["heart.onnx", "custom.onnx", "dt.onnx"] {
        std::fs::write(dir.join(file), b"model bytes").unwrap();
    }
    let catalog = SymptomCatalog::from_symptoms(["itching", "fever", "cough"]);
    Arc::new(ManifestRegistry::new(manifest, dir, Arc::new(catalog)))
}

fn predictor(dir: &Path, loader: Arc<FakeLoader>, fallback: Option<&MockServer>) -> Predictor {
    let mut builder = Predictor::builder().manifest(registry(dir)).loader(loader);
    if let Some(server) = fallback {
        builder = builder.fallback(Arc::new(HttpFallback::new(server.uri()).unwrap()));
    }
    builder.build().unwrap()
}

// ============================================================================
// Primary path
// ============================================================================

#[tokio::test]
async fn primary_success_is_tagged_primary() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(FakeLoader::returning(vec![0.2, 0.8]));
    let predictor = predictor(dir.path(), loader.clone(), None);

    let result = predictor
        .predict("custom", &json!({ "age": 30, "sex": "x" }))
        .await
        .unwrap();

    assert_eq!(result.model, "custom");
    assert_eq!(result.source, Source::Primary);
    assert_eq!(result.prediction, Prediction::Class(1));
    assert_eq!(result.confidence, Some(0.8));
    assert_eq!(loader.last_input(), Some(vec![30.0, 0.0]));
}

#[tokio::test]
async fn symptom_payload_encodes_presence_vector() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(FakeLoader::returning(vec![2.0]));
    let predictor = predictor(dir.path(), loader.clone(), None);

    let result = predictor
        .predict("decision_tree", &json!({ "symptoms": ["fever", "sneezing"] }))
        .await
        .unwrap();

    assert_eq!(result.prediction, Prediction::Value(2.0));
    assert_eq!(loader.last_input(), Some(vec![0.0, 1.0, 0.0]));
}

#[tokio::test]
async fn session_is_loaded_once_across_requests() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(FakeLoader::returning(vec![0.6, 0.4]));
    let predictor = predictor(dir.path(), loader.clone(), None);

    for _ in 0..3 {
        predictor.predict("heart", &json!({ "age": 63 })).await.unwrap();
    }
    assert_eq!(loader.loads(), 1);
}

// ============================================================================
// Fallback path
// ============================================================================

#[tokio::test]
async fn primary_failure_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "model": "heart", "data": { "age": 63 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction": 1,
            "probabilities": [0.25, 0.75],
            "confidence": 0.75
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor(dir.path(), Arc::new(FakeLoader::broken()), Some(&server));

    let result = predictor.predict("heart", &json!({ "age": 63 })).await.unwrap();

    assert_eq!(result.source, Source::Fallback);
    assert_eq!(result.prediction, Prediction::Class(1));
    assert_eq!(result.probabilities, Some(vec![0.25, 0.75]));
    assert_eq!(result.confidence, Some(0.75));
}

#[tokio::test]
async fn fallback_label_prediction_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": "Flu" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor(dir.path(), Arc::new(FakeLoader::broken()), Some(&server));

    let result = predictor
        .predict("decision_tree", &json!({ "symptoms": ["fever"] }))
        .await
        .unwrap();

    assert_eq!(result.source, Source::Fallback);
    assert_eq!(result.prediction, Prediction::Label("Flu".into()));
    assert!(result.probabilities.is_none());
}

#[tokio::test]
async fn inference_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // An empty output is an inference fault.
    let loader = Arc::new(FakeLoader::returning(vec![]));
    let predictor = predictor(dir.path(), loader, Some(&server));

    let result = predictor.predict("heart", &json!({})).await.unwrap();
    assert_eq!(result.source, Source::Fallback);
}

#[tokio::test]
async fn double_failure_aggregates_both_causes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor(dir.path(), Arc::new(FakeLoader::broken()), Some(&server));

    let err = predictor.predict("heart", &json!({ "age": 63 })).await.unwrap_err();

    match err {
        DiagnosError::Aggregate { primary, fallback } => {
            assert!(primary.contains("model file is corrupt"), "primary: {primary}");
            assert!(fallback.contains("503"), "fallback: {fallback}");
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_fallback_service_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor(dir.path(), Arc::new(FakeLoader::broken()), None);

    let err = predictor.predict("heart", &json!({})).await.unwrap_err();

    match err {
        DiagnosError::Aggregate { fallback, .. } => {
            assert!(fallback.contains("no fallback service configured"));
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_model_is_not_found_without_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(FakeLoader::returning(vec![0.5, 0.5]));
    let predictor = predictor(dir.path(), loader.clone(), Some(&server));

    let err = predictor.predict("liver", &json!({})).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(loader.loads(), 0);
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn listing_describes_every_model() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor(dir.path(), Arc::new(FakeLoader::broken()), None);

    let listing = predictor.listing().await.unwrap();
    let keys: Vec<_> = listing.available_models.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["heart", "custom", "decision_tree"]);

    let custom = &listing.available_models[1];
    assert_eq!(custom.n_features, 2);
    assert_eq!(
        custom.feature_names.as_deref(),
        Some(&["age".to_string(), "sex".to_string()][..])
    );

    let symptoms = &listing.available_models[2];
    assert!(symptoms.feature_names.is_none());
    assert_eq!(symptoms.symptoms.as_ref().map(Vec::len), Some(3));
}
