//! Conversation contexts handed to the decision oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::{GameSnapshot, Seat};
use crate::role::ScriptEntry;

/// The phase a conversation happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// The opening night.
    FirstNight,
    /// Every night after the first.
    OtherNight,
    /// Daytime.
    Day,
}

impl Phase {
    /// Returns `true` for either night phase.
    #[must_use]
    pub fn is_night(self) -> bool {
        matches!(self, Self::FirstNight | Self::OtherNight)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FirstNight => "firstNight",
            Self::OtherNight => "otherNight",
            Self::Day => "day",
        };
        f.write_str(name)
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions framing the whole exchange.
    System,
    /// Input from the engine (context, corrections, player answers).
    User,
    /// Output previously produced by the oracle.
    Assistant,
}

/// One entry of the message history exchanged with the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: MessageRole,
    /// Message body.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// An assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything the oracle needs to open a role conversation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleContext {
    /// Phase the role acts in.
    pub phase: Phase,
    /// The acting role.
    pub role: ScriptEntry,
    /// The seat holding the role; `None` outside of seat-bound turns.
    pub target_seat: Option<Seat>,
    /// Human-readable time, e.g. `Night 2`.
    pub time_label: String,
    /// State at the moment the conversation opened.
    pub snapshot: GameSnapshot,
    /// Rendered summary of every role on the script.
    pub script_summary: String,
}

/// Everything the oracle needs for the end-of-day win-condition check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCheckContext {
    /// The day that just finished.
    pub day: u32,
    /// Human-readable time, e.g. `Day 3`.
    pub time_label: String,
    /// State after the day's interaction.
    pub snapshot: GameSnapshot,
    /// Rendered summary of every role on the script.
    pub script_summary: String,
}
