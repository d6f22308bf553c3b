//! Test clock — pins every observation timestamp to one instant.

use chrono::{DateTime, TimeZone, Utc};
use grimoire_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// The instant used across the workspace's tests.
    ///
    /// # Panics
    ///
    /// Never in practice; the date literal is valid.
    #[must_use]
    pub fn standard() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
