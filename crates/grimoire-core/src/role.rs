//! Role definitions as they appear in a script.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved id of the script's metadata record.
pub const META_ID: &str = "_meta";

/// The team a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Good-aligned information and ability roles.
    Townsfolk,
    /// Good-aligned roles with a drawback.
    Outsider,
    /// Evil helpers.
    Minion,
    /// The evil leader.
    Demon,
    /// Roles that join mid-game; never managed by the engine.
    Traveler,
    /// Storyteller-side rule modifiers.
    Fabled,
    /// Any team name this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Townsfolk => "townsfolk",
            Self::Outsider => "outsider",
            Self::Minion => "minion",
            Self::Demon => "demon",
            Self::Traveler => "traveler",
            Self::Fabled => "fabled",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A single role record from a script.
///
/// Night order values of `0` mean the role does not wake on that night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptEntry {
    /// Stable role identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Team the role belongs to.
    pub team: Team,
    /// Ability text.
    pub ability: String,
    /// Wake order on the first night.
    pub first_night: f64,
    /// Wake order on every other night.
    pub other_night: f64,
}

impl ScriptEntry {
    /// Returns `true` if this role is excluded from the playable role set.
    #[must_use]
    pub fn is_traveler(&self) -> bool {
        self.team == Team::Traveler
    }
}
