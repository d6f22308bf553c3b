//! Session bootstrap: seating the table and wiring collaborators.

use std::sync::Arc;

use grimoire_core::allocation::RoleAllocator;
use grimoire_core::clock::Clock;
use grimoire_core::oracle::DecisionOracle;
use grimoire_core::player::{Player, Seat};
use grimoire_core::rng::DeterministicRng;
use grimoire_engine::application::observation::{ConsoleObserver, ObservationLog, ObserverSet};
use grimoire_engine::{EngineConfig, GameEngine};
use grimoire_script::Script;
use grimoire_storyteller::{Grimoire, GrimoireStoryteller, SharedGrimoire, Transport, deal_roles};
use tracing::{info, instrument};

use crate::error::AppError;

/// An assembled, not yet started session.
pub struct Session {
    /// The engine that will drive the session.
    pub engine: GameEngine,
    /// Read side of the grimoire.
    pub grimoire: SharedGrimoire,
    /// Observation log receiving every session event.
    pub log: Arc<ObservationLog>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("grimoire", &self.grimoire)
            .finish_non_exhaustive()
    }
}

/// Asks `allocator` for the team make-up and deals roles onto seats
/// `1..=player_count`.
///
/// # Errors
///
/// Returns `AppError::Config` if no allocation exists for the table, or
/// `AppError::Domain` if dealing fails.
#[instrument(skip(script, allocator, rng))]
pub async fn seat_players(
    script: &Script,
    player_count: u32,
    allocator: &dyn RoleAllocator,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<Player>, AppError> {
    let allocation = allocator
        .determine_role_counts(player_count, &script.roles, None)
        .await
        .ok_or_else(|| {
            AppError::Config(format!(
                "no valid role allocation for {player_count} players on this script"
            ))
        })?;
    info!(?allocation, "role counts decided");

    let seats: Vec<Seat> = (1..=player_count).map(Seat).collect();
    Ok(deal_roles(&seats, &allocation, script, rng)?)
}

/// Wires a grimoire, a storyteller over `transport`, and an observation log
/// (plus a console transcript when `console` is set) around a new engine.
#[must_use]
pub fn assemble(
    script: Script,
    players: Vec<Player>,
    oracle: Arc<dyn DecisionOracle>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    console: bool,
) -> Session {
    let grimoire = SharedGrimoire::new(Grimoire::new(players));
    let log = Arc::new(ObservationLog::new(clock));

    let mut observers = ObserverSet::new().with(log.clone());
    if console {
        observers = observers.with(Arc::new(ConsoleObserver));
    }

    let storyteller = Arc::new(GrimoireStoryteller::new(grimoire.clone(), transport));
    let engine = GameEngine::new(
        script,
        Arc::new(grimoire.clone()),
        oracle,
        storyteller,
        Arc::new(observers),
        config,
    );

    Session {
        engine,
        grimoire,
        log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::allocation::RoleAllocation;
    use grimoire_core::state::GameState;
    use grimoire_script::parse_script;
    use grimoire_storyteller::{ChannelTransport, StaticAllocator};
    use grimoire_test_support::{CallJournal, FixedClock, MockRng, ScriptedOracle};
    use serde_json::json;

    fn script() -> Script {
        parse_script(&[
            json!({ "id": "chef", "team": "townsfolk", "firstNight": 40 }),
            json!({ "id": "monk", "team": "townsfolk", "otherNight": 12 }),
            json!({ "id": "imp", "team": "demon", "otherNight": 24 }),
        ])
    }

    #[tokio::test]
    async fn test_seat_players_fills_every_seat() {
        // Arrange
        let allocator = StaticAllocator::new(RoleAllocation {
            townsfolk: 2,
            outsider: 0,
            minion: 0,
            demon: 1,
        });

        // Act
        let players = seat_players(&script(), 3, &allocator, &mut MockRng)
            .await
            .unwrap();

        // Assert
        let seats: Vec<u32> = players.iter().map(|p| p.seat.0).collect();
        assert_eq!(seats, vec![1, 2, 3]);
        assert_eq!(
            players
                .iter()
                .filter(|p| p.true_role.as_deref() == Some("imp"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_seat_players_without_allocation_is_config_error() {
        let allocator = StaticAllocator::new(RoleAllocation::default());

        let result = seat_players(&script(), 3, &allocator, &mut MockRng).await;

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_assemble_shares_grimoire_with_engine() {
        // Arrange
        let (transport, _handle) = ChannelTransport::connected();

        // Act
        let session = assemble(
            script(),
            vec![Player::new(Seat(1), "chef")],
            Arc::new(ScriptedOracle::new(CallJournal::new())),
            Arc::new(transport),
            Arc::new(FixedClock::standard()),
            EngineConfig::default(),
            false,
        );

        // Assert
        assert_eq!(session.grimoire.seats_by_role("chef"), vec![Seat(1)]);
        assert!(session.log.records().is_empty());
        assert!(!session.engine.engine_state().ended);
    }
}
