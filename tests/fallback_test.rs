//! Tests for the HTTP fallback client against a mock prediction service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diagnos::{DiagnosError, FallbackService, HttpFallback, Prediction};

#[tokio::test]
async fn forwards_model_and_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({
            "model": "diabetes",
            "data": { "glucose": 148, "bmi": 33.6 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction": 1,
            "probabilities": [0.5, 0.5],
            "confidence": 0.5,
            "source": "remote",
            "timestamp": "2025-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpFallback::new(server.uri()).unwrap();
    let result = client
        .predict("diabetes", &json!({ "glucose": 148, "bmi": 33.6 }))
        .await
        .unwrap();

    assert_eq!(result.prediction, Prediction::Class(1));
    assert_eq!(result.probabilities, Some(vec![0.5, 0.5]));
    assert_eq!(result.confidence, Some(0.5));
}

#[tokio::test]
async fn error_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let client = HttpFallback::new(server.uri()).unwrap();
    let err = client.predict("heart", &json!({})).await.unwrap_err();

    assert!(matches!(err, DiagnosError::FallbackUnavailable(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn malformed_body_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = HttpFallback::new(server.uri()).unwrap();
    let err = client.predict("heart", &json!({})).await.unwrap_err();

    assert!(matches!(err, DiagnosError::FallbackUnavailable(ref msg) if msg.contains("malformed")));
}

#[tokio::test]
async fn unreachable_service_is_unavailable() {
    // Bind then drop a listener to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpFallback::new(format!("http://{addr}")).unwrap();
    let err = client.predict("heart", &json!({})).await.unwrap_err();

    assert!(matches!(err, DiagnosError::FallbackUnavailable(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "prediction": 0 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client =
        HttpFallback::with_timeout(server.uri(), Some(Duration::from_millis(100))).unwrap();
    let err = client.predict("heart", &json!({})).await.unwrap_err();

    assert!(matches!(err, DiagnosError::FallbackUnavailable(_)));
}
