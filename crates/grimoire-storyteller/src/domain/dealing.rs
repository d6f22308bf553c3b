//! Seating: drawing roles from the script and dealing them onto seats.

use grimoire_core::allocation::RoleAllocation;
use grimoire_core::error::DomainError;
use grimoire_core::player::{Player, Seat};
use grimoire_core::rng::{DeterministicRng, shuffle};
use grimoire_core::role::{ScriptEntry, Team};
use grimoire_script::Script;
use tracing::info;

/// Teams that are dealt, in draw order.
const DEALT_TEAMS: [Team; 4] = [Team::Townsfolk, Team::Outsider, Team::Minion, Team::Demon];

/// Draws distinct roles per team according to `allocation` and deals them
/// onto `seats` in shuffled order. Every player starts alive, knowing their
/// true role.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the allocation does not cover
/// exactly one role per seat, or the script has too few roles of a team.
pub fn deal_roles(
    seats: &[Seat],
    allocation: &RoleAllocation,
    script: &Script,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<Player>, DomainError> {
    if allocation.total() as usize != seats.len() {
        return Err(DomainError::Validation(format!(
            "allocation covers {} roles but {} seats are filled",
            allocation.total(),
            seats.len()
        )));
    }

    let mut drawn: Vec<ScriptEntry> = Vec::with_capacity(seats.len());
    for team in DEALT_TEAMS {
        let wanted = allocation.count_for(team) as usize;
        let mut pool: Vec<&ScriptEntry> = script.roles_of(team).collect();
        if pool.len() < wanted {
            return Err(DomainError::Validation(format!(
                "script has {} {team} roles, {wanted} needed",
                pool.len()
            )));
        }
        shuffle(rng, &mut pool);
        drawn.extend(pool.into_iter().take(wanted).cloned());
    }
    shuffle(rng, &mut drawn);

    let players: Vec<Player> = seats
        .iter()
        .zip(drawn)
        .map(|(seat, role)| Player::new(*seat, role.id))
        .collect();
    info!(players = players.len(), "roles dealt");
    Ok(players)
}
