use std::time::Duration;

/// Monotonic simulated-time clock driven by the tick counter.
///
/// Time only moves when [`SimClock::advance`] is called, so invincibility and
/// scoring windows follow the simulation rather than the wall clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimClock {
    tick_rate: u32,
    ticks: u64,
}

impl SimClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_rate: tick_rate.max(1),
            ticks: 0,
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Milliseconds of simulated time since the clock started (floored).
    pub fn now_ms(&self) -> u64 {
        self.ticks * 1000 / u64::from(self.tick_rate)
    }

    /// Wall-clock budget for one tick, used to pace the outer loop.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}
