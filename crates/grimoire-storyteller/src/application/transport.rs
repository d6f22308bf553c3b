//! The text channel between the storyteller and the humans at the table.

use async_trait::async_trait;
use grimoire_core::error::DomainError;
use grimoire_core::player::Seat;

/// Carries storyteller text to players and their answers back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers `text` privately to `seat`.
    async fn send(&self, seat: Seat, text: &str) -> Result<(), DomainError>;

    /// Delivers `text` to the whole table.
    async fn broadcast(&self, text: &str) -> Result<(), DomainError>;

    /// Asks `seat` (or anyone at the table, when `None`) and waits for the
    /// answer text.
    async fn ask(&self, seat: Option<Seat>, prompt: &str) -> Result<String, DomainError>;
}
