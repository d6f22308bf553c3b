//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use grimoire_core::oracle::DecisionOracle;
use grimoire_core::player::{Player, Seat};
use grimoire_engine::EngineConfig;
use grimoire_script::{Script, parse_script};
use grimoire_storyteller::{ChannelTransport, TransportHandle};
use grimoire_test_support::FixedClock;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use grimoire_api::routes;
use grimoire_api::session::{Session, assemble};
use grimoire_api::state::AppState;

/// Poisoner wakes first, the chef later on night one; the imp only on
/// other nights.
pub fn script() -> Script {
    parse_script(&[
        json!({ "id": "_meta", "name": "Integration", "author": "tests" }),
        json!({ "id": "chef", "name": "Chef", "team": "townsfolk", "ability": "Learn evil pairs.", "firstNight": 40 }),
        json!({ "id": "poisoner", "name": "Poisoner", "team": "minion", "firstNight": 17, "otherNight": 7 }),
        json!({ "id": "imp", "name": "Imp", "team": "demon", "otherNight": 24 }),
    ])
}

/// Seat 1 chef, seat 2 poisoner, seat 3 imp.
pub fn players() -> Vec<Player> {
    vec![
        Player::new(Seat(1), "chef"),
        Player::new(Seat(2), "poisoner"),
        Player::new(Seat(3), "imp"),
    ]
}

/// Assembles a session over an in-process transport and the router that
/// serves it.
pub fn build_session(
    oracle: Arc<dyn DecisionOracle>,
    config: EngineConfig,
) -> (Session, Router, TransportHandle) {
    let (transport, handle) = ChannelTransport::connected();
    let session = assemble(
        script(),
        players(),
        oracle,
        Arc::new(transport),
        Arc::new(FixedClock::standard()),
        config,
        false,
    );
    let state = AppState::new(
        session.engine.session_id(),
        session.grimoire.clone(),
        session.log.clone(),
        handle.clone(),
    );
    (session, routes::app(state), handle)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
