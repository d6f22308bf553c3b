//! HTTP routes for observing a session and answering its questions.

pub mod health;
pub mod messages;
pub mod prompts;
pub mod session;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(session::router())
        .merge(prompts::router())
        .merge(messages::router());

    // TODO: Replace CorsLayer::permissive() with restricted origins once a UI is served.
    Router::new()
        .merge(health::router())
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
