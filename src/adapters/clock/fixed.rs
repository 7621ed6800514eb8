//! Fixed clock for deterministic tests.

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// A clock pinned to one instant.
///
/// Date validation ("check-in is not in the past") depends on what today
/// is; tests pin it here instead of racing the wall clock.
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    /// A clock that always reports `now`.
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
