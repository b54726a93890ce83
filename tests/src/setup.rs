//! Common test setup.

use std::sync::Arc;

use chrono::Duration;
use parking_core::{Facility, ManualClock};
use telemetry::{init_tracing, TracingConfig};

use crate::fixtures::opening_time;

/// A facility wired to a manual clock.
///
/// Time only moves through `advance_minutes` / `advance`, so billing
/// assertions are exact.
pub struct TestContext {
    pub clock: Arc<ManualClock>,
    pub facility: Facility,
}

impl TestContext {
    /// Facility named "Lot" with `slots` slots at `hourly_rate`.
    pub fn new(slots: usize, hourly_rate: f64) -> Self {
        // Ignore the error: another test in this binary may have installed it.
        let _ = init_tracing(&TracingConfig::new().with_filter("warn"));

        let clock = Arc::new(ManualClock::new(opening_time()));
        let facility = Facility::with_clock("Lot", slots, hourly_rate, clock.clone())
            .expect("Failed to create facility");
        Self { clock, facility }
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance(Duration::minutes(minutes));
    }
}
