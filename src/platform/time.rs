//! Fixed-rate frame pacing

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::MAX_LAG_TICKS;

/// Sleeps between ticks so they start on a fixed schedule
#[derive(Debug, Clone)]
pub struct Pacer {
    period: Option<Duration>,
    /// When the next tick is due
    deadline: Option<Instant>,
}

impl Pacer {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            period: Some(Duration::from_secs(1) / tick_rate.max(1)),
            deadline: None,
        }
    }

    /// Never sleeps; ticks run back to back
    pub fn unpaced() -> Self {
        Self {
            period: None,
            deadline: None,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How long to sleep at `now` before the next tick, advancing the schedule
    ///
    /// Small lag is worked off by running ticks back to back; beyond
    /// `MAX_LAG_TICKS` the schedule restarts from `now` instead.
    pub fn schedule(&mut self, now: Instant) -> Duration {
        let Some(period) = self.period else {
            return Duration::ZERO;
        };

        let mut deadline = self.deadline.unwrap_or(now + period);
        if now > deadline + period * MAX_LAG_TICKS {
            log::warn!(
                "Frame pacing fell {:?} behind, re-anchoring",
                now.duration_since(deadline)
            );
            deadline = now;
        }

        self.deadline = Some(deadline + period);
        deadline.saturating_duration_since(now)
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        let delay = self.schedule(Instant::now());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
