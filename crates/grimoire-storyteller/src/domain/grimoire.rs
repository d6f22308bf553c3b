//! The grimoire: the storyteller's authoritative record of the table.

use std::sync::{Arc, PoisonError, RwLock};

use grimoire_core::error::DomainError;
use grimoire_core::player::{GameOutcome, GameSnapshot, Player, Seat};
use grimoire_core::state::GameState;

/// In-memory game state: players in seat order and the recorded outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grimoire {
    players: Vec<Player>,
    outcome: Option<GameOutcome>,
}

impl Grimoire {
    /// Creates a grimoire, ordering `players` by seat.
    #[must_use]
    pub fn new(mut players: Vec<Player>) -> Self {
        players.sort_by_key(|p| p.seat);
        Self {
            players,
            outcome: None,
        }
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player in `seat`, if seated.
    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    /// The recorded outcome, once the game has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    fn player_mut(&mut self, seat: Seat) -> Result<&mut Player, DomainError> {
        self.players
            .iter_mut()
            .find(|p| p.seat == seat)
            .ok_or_else(|| DomainError::Validation(format!("no player in seat {seat}")))
    }

    /// Attaches `token` to `seat`. Returns `false` if the seat already
    /// carries it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if nobody sits in `seat`.
    pub fn add_token(&mut self, seat: Seat, token: &str) -> Result<bool, DomainError> {
        let player = self.player_mut(seat)?;
        if player.tokens.iter().any(|t| t == token) {
            return Ok(false);
        }
        player.tokens.push(token.to_owned());
        Ok(true)
    }

    /// Detaches `token` from `seat`. Returns `false` if the seat did not
    /// carry it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if nobody sits in `seat`.
    pub fn remove_token(&mut self, seat: Seat, token: &str) -> Result<bool, DomainError> {
        let player = self.player_mut(seat)?;
        let before = player.tokens.len();
        player.tokens.retain(|t| t != token);
        Ok(player.tokens.len() != before)
    }

    /// Records how the game was decided. A later call replaces the outcome.
    pub fn record_outcome(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
    }

    /// An immutable copy for readers.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            outcome: self.outcome.clone(),
        }
    }
}

/// Cloneable handle to a grimoire shared between the storyteller (the only
/// writer) and any number of readers.
#[derive(Debug, Clone, Default)]
pub struct SharedGrimoire {
    inner: Arc<RwLock<Grimoire>>,
}

impl SharedGrimoire {
    /// Wraps `grimoire` in a shared handle.
    #[must_use]
    pub fn new(grimoire: Grimoire) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grimoire)),
        }
    }

    /// Runs `f` with read access.
    pub fn read<R>(&self, f: impl FnOnce(&Grimoire) -> R) -> R {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Runs `f` with write access.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Grimoire) -> R) -> R {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner))
    }
}

impl GameState for SharedGrimoire {
    fn players(&self) -> Vec<Player> {
        self.read(|g| g.players().to_vec())
    }

    fn tokens(&self, seat: Seat) -> Vec<String> {
        self.read(|g| g.player(seat).map(|p| p.tokens.clone()).unwrap_or_default())
    }

    fn seats_by_role(&self, role_id: &str) -> Vec<Seat> {
        self.read(|g| {
            g.players()
                .iter()
                .filter(|p| p.true_role.as_deref() == Some(role_id))
                .map(|p| p.seat)
                .collect()
        })
    }

    fn snapshot(&self) -> GameSnapshot {
        self.read(Grimoire::snapshot)
    }
}
