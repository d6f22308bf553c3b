//! Role-count allocation, consulted once at setup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::role::{ScriptEntry, Team};

/// How many roles of each team go into play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAllocation {
    /// Townsfolk count.
    pub townsfolk: u32,
    /// Outsider count.
    pub outsider: u32,
    /// Minion count.
    pub minion: u32,
    /// Demon count.
    pub demon: u32,
}

impl RoleAllocation {
    /// Total number of roles in play.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.townsfolk + self.outsider + self.minion + self.demon
    }

    /// Count for `team`; teams that are never dealt yield zero.
    #[must_use]
    pub fn count_for(&self, team: Team) -> u32 {
        match team {
            Team::Townsfolk => self.townsfolk,
            Team::Outsider => self.outsider,
            Team::Minion => self.minion,
            Team::Demon => self.demon,
            Team::Traveler | Team::Fabled | Team::Unknown => 0,
        }
    }
}

/// Decides the team make-up for a table.
#[async_trait]
pub trait RoleAllocator: Send + Sync {
    /// Returns the allocation for `player_count` players, or `None` when no
    /// valid allocation exists.
    async fn determine_role_counts(
        &self,
        player_count: u32,
        roles: &[ScriptEntry],
        custom_rules: Option<&str>,
    ) -> Option<RoleAllocation>;
}
