// GuildLog - core/timeframe.rs
//
// Closed interval over absolute instants with containment testing.
// Core layer: pure logic, no I/O.

use chrono::{DateTime, Duration, FixedOffset};
use std::fmt;

/// An immutable closed interval `[start, end]`.
///
/// Construction never fails: reversed bounds are swapped so that
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl Timeframe {
    /// Build a timeframe from two instants given in either order.
    pub fn new(a: DateTime<FixedOffset>, b: DateTime<FixedOffset>) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Equivalent to `Timeframe::new(start, start + duration)`.
    /// A negative duration yields a window ending at `start`.
    pub fn from_delta(start: DateTime<FixedOffset>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// True iff `start <= instant <= end`. Both bounds are inclusive.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
