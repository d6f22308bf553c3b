//! Integration tests for the health endpoint and routing.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use grimoire_engine::EngineConfig;
use grimoire_test_support::{CallJournal, ScriptedOracle};

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let oracle = Arc::new(ScriptedOracle::new(CallJournal::new()));
    let (_session, app, _handle) = common::build_session(oracle, EngineConfig::default());

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let oracle = Arc::new(ScriptedOracle::new(CallJournal::new()));
    let (_session, app, _handle) = common::build_session(oracle, EngineConfig::default());

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
