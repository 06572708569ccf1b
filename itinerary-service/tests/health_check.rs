mod common;

use common::{StubProvider, TestApp};
use itinerary_service::services::providers::MockGenerationProvider;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn health_check_reports_provider() {
    let app = TestApp::spawn_with_provider(StubProvider::replying("")).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "itinerary-service");
    assert_eq!(body["provider"], "stub");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn_with_provider(Arc::new(MockGenerationProvider::default())).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn static_assets_are_served() {
    let app = TestApp::spawn_with_provider(Arc::new(MockGenerationProvider::default())).await;

    let response = app
        .client
        .get(format!("{}/static/app.js", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let script = response.text().await.unwrap();
    assert!(script.contains("Generating..."));
}

#[tokio::test]
async fn metrics_endpoint_exposes_itinerary_counters() {
    let app = TestApp::spawn_with_provider(Arc::new(MockGenerationProvider::default())).await;

    // one successful plan through the mock sample
    app.post_itinerary(&common::tokyo_request()).await;

    let response = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.contains("itinerary_requests_total"));
    assert!(text.contains("outcome=\"success\""));
    assert!(text.contains("generation_duration_seconds"));
}
