//! Shared test doubles and utilities for the Grimoire game engine.

mod clock;
mod journal;
mod oracle;
mod rng;
mod state;
mod storyteller;

pub use clock::FixedClock;
pub use journal::{Call, CallJournal};
pub use oracle::{FailingOracle, ScriptedOracle};
pub use rng::{MockRng, SequenceRng};
pub use state::StaticGameState;
pub use storyteller::RecordingStoryteller;
