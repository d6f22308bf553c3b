//! Read interface of the game state.

use crate::player::{GameSnapshot, Player, Seat};

/// Read-only view of the game state.
///
/// The storyteller is the only writer; everything else, the engine included,
/// goes through this trait and sees copies.
pub trait GameState: Send + Sync {
    /// Players in seat order.
    fn players(&self) -> Vec<Player>;

    /// Tokens attached to `seat`, in insertion order. Empty for unknown seats.
    fn tokens(&self, seat: Seat) -> Vec<String>;

    /// Seats whose true role is `role_id`, in seat order.
    fn seats_by_role(&self, role_id: &str) -> Vec<Seat>;

    /// Serializable copy of the whole state.
    fn snapshot(&self) -> GameSnapshot;
}
