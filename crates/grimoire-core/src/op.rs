//! Ops — the closed set of actions the oracle may request.
//!
//! On the wire an op is `{"type": "<kind>", "payload": {...}}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Seat;

/// A single requested state change or communication action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Op {
    /// Ask a seat a question; the answer resumes the conversation.
    PromptPlayer {
        /// Seat being asked.
        seat: Seat,
        /// Question text.
        text: String,
    },
    /// Deliver private text to a seat.
    SendToPlayer {
        /// Recipient seat.
        seat: Seat,
        /// Message text.
        text: String,
    },
    /// Deliver public text to the whole table.
    Broadcast {
        /// Message text.
        text: String,
    },
    /// Attach a token to a seat.
    AddToken {
        /// Target seat.
        seat: Seat,
        /// Token name.
        token: String,
    },
    /// Remove a token from a seat.
    RemoveToken {
        /// Target seat.
        seat: Seat,
        /// Token name.
        token: String,
    },
    /// The acting role has nothing more to do.
    EndRole {
        /// Optional note for the log.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// The game is decided.
    Gameover {
        /// Winning side.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        winner: Option<String>,
        /// Why the game ended.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Op {
    /// Returns the kind of this op.
    #[must_use]
    pub fn kind(&self) -> OpKind {
        match self {
            Self::PromptPlayer { .. } => OpKind::PromptPlayer,
            Self::SendToPlayer { .. } => OpKind::SendToPlayer,
            Self::Broadcast { .. } => OpKind::Broadcast,
            Self::AddToken { .. } => OpKind::AddToken,
            Self::RemoveToken { .. } => OpKind::RemoveToken,
            Self::EndRole { .. } => OpKind::EndRole,
            Self::Gameover { .. } => OpKind::Gameover,
        }
    }

    /// Returns the seat this op targets, if any.
    #[must_use]
    pub fn seat(&self) -> Option<Seat> {
        match self {
            Self::PromptPlayer { seat, .. }
            | Self::SendToPlayer { seat, .. }
            | Self::AddToken { seat, .. }
            | Self::RemoveToken { seat, .. } => Some(*seat),
            Self::Broadcast { .. } | Self::EndRole { .. } | Self::Gameover { .. } => None,
        }
    }
}

/// Discriminant of [`Op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    /// See [`Op::PromptPlayer`].
    PromptPlayer,
    /// See [`Op::SendToPlayer`].
    SendToPlayer,
    /// See [`Op::Broadcast`].
    Broadcast,
    /// See [`Op::AddToken`].
    AddToken,
    /// See [`Op::RemoveToken`].
    RemoveToken,
    /// See [`Op::EndRole`].
    EndRole,
    /// See [`Op::Gameover`].
    Gameover,
}

impl OpKind {
    /// Every op kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::PromptPlayer,
        Self::SendToPlayer,
        Self::Broadcast,
        Self::AddToken,
        Self::RemoveToken,
        Self::EndRole,
        Self::Gameover,
    ];

    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PromptPlayer => "prompt_player",
            Self::SendToPlayer => "send_to_player",
            Self::Broadcast => "broadcast",
            Self::AddToken => "add_token",
            Self::RemoveToken => "remove_token",
            Self::EndRole => "end_role",
            Self::Gameover => "gameover",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-context allowlist of op kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedOps(&'static [OpKind]);

/// Ops admitted after filtering, plus the ones that were turned away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredOps {
    /// Ops whose kind is allowed, in their original order.
    pub allowed: Vec<Op>,
    /// Ops whose kind is not allowed, in their original order.
    pub rejected: Vec<Op>,
}

impl AllowedOps {
    /// Role conversations may request any op.
    pub const ROLE_CONVERSATION: Self = Self(&OpKind::ALL);

    /// The day win-check may only end the game or decline to.
    pub const DAY_CHECK: Self = Self(&[OpKind::Gameover, OpKind::EndRole]);

    /// Returns `true` if `kind` is admitted.
    #[must_use]
    pub fn permits(self, kind: OpKind) -> bool {
        self.0.contains(&kind)
    }

    /// The admitted kinds.
    #[must_use]
    pub fn kinds(self) -> &'static [OpKind] {
        self.0
    }

    /// Splits a batch into allowed and rejected ops, preserving order.
    #[must_use]
    pub fn filter(self, ops: Vec<Op>) -> FilteredOps {
        let (allowed, rejected) = ops.into_iter().partition(|op| self.permits(op.kind()));
        FilteredOps { allowed, rejected }
    }
}
