//! Whole-second countdown behind the per-question timer.
//!
//! `Countdown` holds no callbacks and reads no clock; something else reports
//! each elapsed second through [`Countdown::tick`].

use serde::{Deserialize, Serialize};

/// Snapshot of a countdown for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub running: bool,
}

/// How close a running countdown is to expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Calm,
    Warning,
    Critical,
}

impl TimerState {
    /// Remaining time as a whole percentage of the total, rounded half-up.
    #[must_use]
    pub fn percent_remaining(&self) -> u32 {
        if self.total_seconds == 0 {
            return 0;
        }
        let remaining = u64::from(self.remaining_seconds.min(self.total_seconds));
        let total = u64::from(self.total_seconds);
        let pct = (remaining * 200 + total) / (total * 2);
        u32::try_from(pct).unwrap_or(100)
    }

    /// More than 5 seconds left is calm, 4-5 is a warning, 3 or less is critical.
    #[must_use]
    pub fn urgency(&self) -> Urgency {
        match self.remaining_seconds {
            0..=3 => Urgency::Critical,
            4..=5 => Urgency::Warning,
            _ => Urgency::Calm,
        }
    }
}

/// Result of one elapsed second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Tick(u32),
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: u32,
    total: u32,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to `total` seconds and starts running. Returns the initial value.
    ///
    /// A zero-length countdown is running but expires on the first tick.
    pub fn start(&mut self, total: u32) -> u32 {
        self.total = total;
        self.remaining = total;
        self.running = true;
        total
    }

    /// Consumes one second. Returns `None` when not running.
    ///
    /// Reaching zero yields `Expired` exactly once and stops the countdown.
    pub fn tick(&mut self) -> Option<CountdownStep> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return Some(CountdownStep::Expired);
        }
        Some(CountdownStep::Tick(self.remaining))
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining,
            total_seconds: self.total,
            running: self.running,
        }
    }
}
