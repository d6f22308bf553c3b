//! Wall-clock abstraction used to timestamp observation records.

use chrono::{DateTime, Utc};

/// Source of the current time. Injected so that recorded sessions carry
/// reproducible timestamps under test.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the host's system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
