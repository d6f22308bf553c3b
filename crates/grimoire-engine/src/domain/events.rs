//! Session events published to the observation channel.
//!
//! The channel is write-only from the engine's point of view: nothing
//! published here is ever read back to make a decision.

use grimoire_core::op::Op;
use grimoire_core::storyteller::{ApplyResult, PlayerResponse};
use serde::Serialize;
use uuid::Uuid;

use super::outcome::SessionOutcome;

/// Something observable that happened during a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session loop began.
    SessionStarted {
        /// Session identifier.
        session_id: Uuid,
    },
    /// A night began.
    NightStarted {
        /// Night number.
        night: u32,
    },
    /// A day began.
    DayStarted {
        /// Day number.
        day: u32,
    },
    /// A batch was applied by the storyteller.
    OpsApplied {
        /// Where the batch came from, e.g. `Night 1 / poisoner @ seat 3`.
        label: String,
        /// The applied ops, in order.
        ops: Vec<Op>,
        /// The aggregate result.
        result: ApplyResult,
    },
    /// Ops were removed from a batch by the context's allowlist.
    OpsRejected {
        /// Where the batch came from.
        label: String,
        /// The removed ops, in order.
        ops: Vec<Op>,
    },
    /// A human answered.
    PlayerResponded {
        /// Where the answer was awaited.
        label: String,
        /// The answer.
        response: PlayerResponse,
    },
    /// A night finished without the game ending.
    NightEnded {
        /// Night number.
        night: u32,
        /// Tab-separated state table.
        table: String,
    },
    /// A conversation hit its step bound.
    ConversationExhausted {
        /// The conversation.
        label: String,
        /// Steps used.
        steps: u32,
    },
    /// The session loop returned.
    SessionFinished {
        /// How it finished.
        outcome: SessionOutcome,
    },
}

/// Receiver of session events.
pub trait Observer: Send + Sync {
    /// Handles one event.
    fn observe(&self, event: &SessionEvent);
}
