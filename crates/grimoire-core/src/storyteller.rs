//! Storyteller abstraction — the single writer of the game state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::op::Op;
use crate::player::Seat;

/// Aggregate result of applying one op batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    /// The game is over; the session must stop.
    pub ended: bool,
    /// A question to a human is outstanding.
    pub paused: bool,
}

/// A human answer delivered through the storyteller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResponse {
    /// The answering seat, if the question was addressed to one.
    pub seat: Option<Seat>,
    /// The answer text.
    pub text: String,
    /// The question that was answered.
    pub context: Option<String>,
}

/// Applies ops to the game state and mediates pauses with humans.
#[async_trait]
pub trait Storyteller: Send + Sync {
    /// Announces the start of night `night`.
    async fn start_night(&self, night: u32) -> Result<(), DomainError>;

    /// Announces the start of day `day`.
    async fn start_day(&self, day: u32) -> Result<(), DomainError>;

    /// Waits for the next human answer.
    async fn await_response(&self) -> Result<PlayerResponse, DomainError>;

    /// Applies `ops` strictly in order and reports the aggregate result.
    async fn apply_ops(&self, ops: &[Op]) -> Result<ApplyResult, DomainError>;

    /// Called once a role conversation is over without ending the game.
    /// Questions that conversation left unanswered must not carry over into
    /// the next one.
    async fn end_conversation(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
