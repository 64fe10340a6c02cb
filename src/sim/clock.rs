//! Tick scheduler
//!
//! Fires one tick per period. An overrunning tick pushes the next deadline
//! out instead of queueing catch-up ticks.

use std::time::{Duration, Instant};

use crate::consts::TICK_RATE_HZ;

#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::with_rate(TICK_RATE_HZ)
    }
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn with_rate(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true if a tick should run now. The first poll always fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.period);
                true
            }
        }
    }

    /// How long until the next tick is due
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Stop scheduling; the next poll fires immediately
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}
