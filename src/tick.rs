use std::time::{Duration, Instant};

/// Fires at most once per `interval`, measured from the last time it fired.
#[derive(Clone, Copy, Debug)]
pub struct TickGate {
    interval: Duration,
    last: Instant,
}

impl TickGate {
    pub fn new(interval: Duration, now: Instant) -> Self {
        TickGate {
            interval,
            last: now,
        }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// How long to wait for input before the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.interval.saturating_sub(now.saturating_duration_since(self.last))
    }
}
