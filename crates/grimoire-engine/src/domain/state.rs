//! Engine-owned session counters.

use serde::Serialize;

/// Counters and the terminal flag. Mutated only by the engine's own loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineState {
    /// The current (or last) night, starting at 1.
    pub night: u32,
    /// The current (or last) day, starting at 1.
    pub day: u32,
    /// Set once a storyteller result ends the game; never cleared.
    pub ended: bool,
}
