//! Seats, players and the immutable game snapshot.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A unique per-player position at the table.
///
/// Serializes as a bare number. Decoding also accepts a numeric string such
/// as `"3"`, which language models tend to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Seat(pub u32);

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSeat {
            Number(u32),
            Text(String),
        }

        match RawSeat::deserialize(deserializer)? {
            RawSeat::Number(n) => Ok(Self(n)),
            RawSeat::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("not a seat number: {text:?}"))),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Seat {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A player seated at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The player's seat.
    pub seat: Seat,
    /// Whether the player is alive.
    pub alive: bool,
    /// The role the player believes they hold.
    pub known_role: Option<String>,
    /// The role the player actually holds (a script entry id).
    pub true_role: Option<String>,
    /// Tokens attached to the seat, in the order they were added.
    pub tokens: Vec<String>,
}

impl Player {
    /// Creates a living player whose known role matches their true role.
    #[must_use]
    pub fn new(seat: Seat, role_id: impl Into<String>) -> Self {
        let role_id = role_id.into();
        Self {
            seat,
            alive: true,
            known_role: Some(role_id.clone()),
            true_role: Some(role_id),
            tokens: Vec::new(),
        }
    }
}

/// How a finished game was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// The winning side, if the oracle named one.
    pub winner: Option<String>,
    /// Free-form explanation.
    pub reason: Option<String>,
}

/// Serializable, immutable copy of the game state.
///
/// Readers never get a live reference into the state; every prompt is built
/// from a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Players in seat order as held by the game state.
    pub players: Vec<Player>,
    /// Set once a `gameover` op has been applied.
    pub outcome: Option<GameOutcome>,
}

impl GameSnapshot {
    /// Looks up the player in `seat`.
    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }
}
