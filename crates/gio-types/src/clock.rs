//! Logical timestamps.
//!
//! Requests are stamped with a logical tick rather than wall-clock time:
//! only the relative order of issuance matters to the coordinator.

use serde::{Deserialize, Serialize};

/// A point on a [`LogicalClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalTime(u64);

impl LogicalTime {
    /// The time before any tick.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick count.
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LogicalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic tick counter.
///
/// # Example
///
/// ```
/// use gio_types::LogicalClock;
///
/// let mut clock = LogicalClock::new();
/// let a = clock.tick();
/// let b = clock.tick();
/// assert!(a < b);
/// assert_eq!(clock.now(), b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogicalClock {
    now: LogicalTime,
}

impl LogicalClock {
    /// Creates a clock at [`LogicalTime::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock and returns the new time.
    pub fn tick(&mut self) -> LogicalTime {
        self.now = LogicalTime(self.now.0.saturating_add(1));
        self.now
    }

    /// Returns the current time without advancing.
    #[must_use]
    pub fn now(&self) -> LogicalTime {
        self.now
    }
}
