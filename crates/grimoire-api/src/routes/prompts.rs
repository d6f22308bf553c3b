//! Routes for answering the storyteller's questions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use grimoire_core::error::DomainError;
use grimoire_storyteller::PendingQuestion;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

const NO_PENDING_PROMPT: &str = "no_pending_prompt";

/// Request body for POST /prompts/respond.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    /// The answer text.
    pub text: String,
}

/// GET /prompts/pending
async fn pending(State(state): State<AppState>) -> Result<Json<PendingQuestion>, ApiError> {
    state.transport.pending().map(Json).ok_or_else(|| {
        ApiError::NotFound(NO_PENDING_PROMPT, "no question is waiting for an answer".into())
    })
}

/// POST /prompts/respond
#[instrument(skip(state, request))]
async fn respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Result<(StatusCode, Json<PendingQuestion>), ApiError> {
    match state.transport.respond(request.text) {
        Ok(question) => {
            info!(seat = ?question.seat, "question answered");
            Ok((StatusCode::ACCEPTED, Json(question)))
        }
        Err(DomainError::Validation(message)) => {
            Err(ApiError::Conflict(NO_PENDING_PROMPT, message))
        }
        Err(err) => Err(err.into()),
    }
}

/// Returns the router for prompt handling.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prompts/pending", get(pending))
        .route("/prompts/respond", post(respond))
}
