//! Test RNGs — deterministic `DeterministicRng` implementations.

use grimoire_core::rng::DeterministicRng;

/// Always returns `min`. Suitable for tests that do not care how roles are
/// drawn.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays scripted draws in order, wrapping around once they run out, so a
/// test can pin exactly which roles are drawn and where they sit. Draws are
/// not clamped to the requested range; that is left to the caller.
#[derive(Debug)]
pub struct SequenceRng {
    draws: Vec<u32>,
    next: usize,
}

impl SequenceRng {
    /// Creates an RNG replaying `draws`. An empty list always draws `min`.
    #[must_use]
    pub fn new(draws: Vec<u32>) -> Self {
        Self { draws, next: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn taken(&self) -> usize {
        self.next
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        let draw = if self.draws.is_empty() {
            min
        } else {
            self.draws[self.next % self.draws.len()]
        };
        self.next += 1;
        draw
    }
}
