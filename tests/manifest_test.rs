//! Tests for manifest loading from disk.

use std::sync::Arc;

use diagnos::{DiagnosError, ManifestRegistry, ModelFamily, SymptomCatalog};

fn registry(dir: &std::path::Path) -> ManifestRegistry {
    ManifestRegistry::new(
        dir.join("models_manifest.json"),
        dir,
        Arc::new(SymptomCatalog::builtin()),
    )
}

#[tokio::test]
async fn manifest_is_read_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models_manifest.json");
    std::fs::write(
        &path,
        r#"{
            "generated_at": "2025-01-01T00:00:00Z",
            "models": [
                {"key": "diabetes", "file": "diabetes.onnx", "n_features": 8},
                {"key": "decision_tree", "file": "decision_tree.onnx", "n_features": null}
            ]
        }"#,
    )
    .unwrap();

    let registry = registry(dir.path());
    assert!(!registry.is_loaded());

    let diabetes = registry.resolve("diabetes").await.unwrap();
    assert_eq!(diabetes.artifact_path, dir.path().join("diabetes.onnx"));
    assert!(registry.is_loaded());

    // Later lookups never touch the file again.
    std::fs::remove_file(&path).unwrap();
    let tree = registry.resolve("decision_tree").await.unwrap();
    assert_eq!(tree.family, ModelFamily::Symptoms);
    assert_eq!(tree.feature_count, SymptomCatalog::builtin().len());
}

#[tokio::test]
async fn failed_read_is_retried() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());

    let err = registry.resolve("heart").await.unwrap_err();
    assert!(matches!(err, DiagnosError::Configuration(_)));

    std::fs::write(
        dir.path().join("models_manifest.json"),
        r#"{"models": [{"key": "heart", "file": "heart.onnx", "n_features": 13}]}"#,
    )
    .unwrap();

    let heart = registry.resolve("heart").await.unwrap();
    assert_eq!(heart.feature_order().len(), 13);
}

#[tokio::test]
async fn malformed_manifest_fails_every_lookup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("models_manifest.json"), "{ models: oops").unwrap();
    let registry = registry(dir.path());

    for key in ["heart", "diabetes"] {
        let err = registry.resolve(key).await.unwrap_err();
        assert!(matches!(err, DiagnosError::Configuration(_)));
    }
    assert!(registry.keys().await.is_err());
}
