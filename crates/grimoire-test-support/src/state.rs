//! Test game state — a fixed table of players.

use grimoire_core::player::{GameSnapshot, Player, Seat};
use grimoire_core::state::GameState;

/// A `GameState` over a fixed list of players that never changes.
#[derive(Debug, Clone, Default)]
pub struct StaticGameState {
    players: Vec<Player>,
}

impl StaticGameState {
    /// Creates a state holding `players` in the given order.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Convenience constructor: one living player per `(seat, role_id)`.
    #[must_use]
    pub fn seated(seats: &[(u32, &str)]) -> Self {
        Self::new(
            seats
                .iter()
                .map(|(seat, role)| Player::new(Seat(*seat), *role))
                .collect(),
        )
    }
}

impl GameState for StaticGameState {
    fn players(&self) -> Vec<Player> {
        self.players.clone()
    }

    fn tokens(&self, seat: Seat) -> Vec<String> {
        self.players
            .iter()
            .find(|p| p.seat == seat)
            .map(|p| p.tokens.clone())
            .unwrap_or_default()
    }

    fn seats_by_role(&self, role_id: &str) -> Vec<Seat> {
        self.players
            .iter()
            .filter(|p| p.true_role.as_deref() == Some(role_id))
            .map(|p| p.seat)
            .collect()
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            outcome: None,
        }
    }
}
