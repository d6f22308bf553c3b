//! Role-count allocation from configured counts.

use async_trait::async_trait;
use grimoire_core::allocation::{RoleAllocation, RoleAllocator};
use grimoire_core::role::{ScriptEntry, Team};
use tracing::warn;

/// Allocates a fixed, configured team make-up.
///
/// There is no role-count algorithm here; the table's make-up is supplied by
/// whoever runs the session and only checked for feasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAllocator {
    counts: RoleAllocation,
}

impl StaticAllocator {
    /// Creates an allocator that always proposes `counts`.
    #[must_use]
    pub fn new(counts: RoleAllocation) -> Self {
        Self { counts }
    }
}

#[async_trait]
impl RoleAllocator for StaticAllocator {
    async fn determine_role_counts(
        &self,
        player_count: u32,
        roles: &[ScriptEntry],
        _custom_rules: Option<&str>,
    ) -> Option<RoleAllocation> {
        if self.counts.total() != player_count {
            warn!(
                player_count,
                configured = self.counts.total(),
                "configured role counts do not match the player count"
            );
            return None;
        }
        for team in [Team::Townsfolk, Team::Outsider, Team::Minion, Team::Demon] {
            let available = roles.iter().filter(|r| r.team == team).count();
            if available < self.counts.count_for(team) as usize {
                warn!(%team, available, "script lacks roles for the configured counts");
                return None;
            }
        }
        Some(self.counts)
    }
}
