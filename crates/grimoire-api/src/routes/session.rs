//! Read-only views of the running session.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use grimoire_core::player::{GameOutcome, GameSnapshot};
use grimoire_core::state::GameState;
use grimoire_engine::SessionOutcome;
use grimoire_engine::application::observation::ObservationRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

/// Response body for GET /session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// The session identifier.
    pub session_id: Uuid,
    /// Last night started.
    pub night: u32,
    /// Last day started.
    pub day: u32,
    /// Whether a `gameover` has been applied.
    pub ended: bool,
    /// Whether the session loop has returned.
    pub finished: bool,
    /// How the session loop finished.
    pub outcome: Option<SessionOutcome>,
    /// The recorded game result.
    pub result: Option<GameOutcome>,
}

/// Query string for GET /log.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    /// Only return records with a greater sequence number.
    pub after: Option<u64>,
}

/// GET /session
async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let progress = state.log.progress();
    let result = state.grimoire.read(|g| g.outcome().cloned());
    Json(SessionResponse {
        session_id: state.session_id,
        night: progress.night,
        day: progress.day,
        ended: result.is_some(),
        finished: progress.finished,
        outcome: progress.outcome,
        result,
    })
}

/// GET /grimoire
async fn get_grimoire(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(state.grimoire.snapshot())
}

/// GET /log
async fn get_log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Json<Vec<ObservationRecord>> {
    Json(state.log.records_after(query.after.unwrap_or(0)))
}

/// Returns the router for session views.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/grimoire", get(get_grimoire))
        .route("/log", get(get_log))
}
