//! Messages the storyteller has delivered to seats and to the table.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use grimoire_core::player::Seat;
use grimoire_storyteller::Delivery;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query string for GET /messages.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    /// Only what this seat could see: its private messages and broadcasts.
    pub seat: Option<u32>,
    /// Skip this many deliveries, counted over every seat. Pass the `next`
    /// of the previous poll.
    pub after: Option<usize>,
}

/// Response body for GET /messages.
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    /// Cursor for the next poll.
    pub next: usize,
    /// Deliveries visible to the caller, oldest first.
    pub messages: Vec<Delivery>,
}

/// GET /messages
async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Json<MessagesResponse> {
    let after = query.after.unwrap_or(0);
    let deliveries = state.transport.deliveries_after(after);
    let next = after + deliveries.len();
    let messages = match query.seat.map(Seat) {
        Some(seat) => deliveries
            .into_iter()
            .filter(|d| d.seat.is_none_or(|s| s == seat))
            .collect(),
        None => deliveries,
    };
    Json(MessagesResponse { next, messages })
}

/// Returns the router for delivered messages.
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", get(list_messages))
}
