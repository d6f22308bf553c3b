//! How conversations and sessions finish.

use serde::{Deserialize, Serialize};

/// Result of one role conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConversationOutcome {
    /// A non-pausing round was applied; the role's turn is over.
    Completed {
        /// Oracle invocations used.
        steps: u32,
    },
    /// An applied batch ended the game.
    Ended {
        /// Oracle invocations used.
        steps: u32,
    },
    /// The step bound ran out before the turn completed.
    StepBoundExhausted {
        /// Oracle invocations used.
        steps: u32,
        /// Batches that were applied along the way (all of them paused).
        applied_rounds: u32,
    },
}

/// Result of a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The game was decided.
    Ended {
        /// Nights started.
        nights: u32,
        /// Days started.
        days: u32,
    },
    /// The cycle bound ran out without the game being decided. This is an
    /// anomaly, not a result.
    CycleBoundExhausted {
        /// Day/OtherNight cycles completed.
        cycles: u32,
    },
}

impl SessionOutcome {
    /// Returns `true` if the session stopped on its cycle bound.
    #[must_use]
    pub fn is_runaway(&self) -> bool {
        matches!(self, Self::CycleBoundExhausted { .. })
    }
}
