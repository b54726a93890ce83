//! Time source for ticket timestamps.

use chrono::{DateTime, Duration, FixedOffset, Local, Offset, Utc};
use parking_lot::Mutex;
use std::fmt::Debug;

/// Supplies "now" to the facility.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the facility's local time. Calendar dates and printed
    /// timestamps use it.
    fn offset(&self) -> FixedOffset {
        Utc.fix()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// A clock that only moves when told to.
///
/// Share it with the facility through an `Arc` and keep a handle to advance
/// time between operations.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Starts at `start` with local time equal to UTC.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_offset(start, Utc.fix())
    }

    pub fn with_offset(start: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Mutex::new(start),
            offset,
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
