//! Random number generator abstraction for determinism.
//!
//! Randomness is only consumed at setup time, when roles are drawn from the
//! script and dealt onto seats. Production code wraps a seeded RNG; tests
//! inject a scripted sequence so that the dealt table is predictable.

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Shuffles `items` in place (Fisher–Yates) using the injected RNG.
///
/// Every draw is clamped to the valid index range, so a scripted RNG that
/// returns out-of-range values cannot cause a panic.
pub fn shuffle<T>(rng: &mut dyn DeterministicRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let upper = u32::try_from(i).unwrap_or(u32::MAX);
        let j = rng.next_u32_range(0, upper).min(upper) as usize;
        items.swap(i, j);
    }
}
