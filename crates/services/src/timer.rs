//! Per-question timer with tick and expiry callbacks.

use std::fmt;

use quiz_core::{Countdown, CountdownStep, TimerState};

type TickHook = Box<dyn FnMut(u32) + Send>;
type ExpireHook = Box<dyn FnOnce() + Send>;

/// Event produced by [`Timer::elapse_second`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(u32),
    Expired,
}

/// Whole-second countdown that reports to callbacks.
///
/// The timer owns no clock. Whoever drives it calls [`Timer::elapse_second`] once
/// per second. `on_tick` receives the full duration on `start`, then the
/// remaining seconds after each elapsed second; at zero `on_expire` runs instead,
/// at most once, and the timer stops.
#[derive(Default)]
pub struct Timer {
    countdown: Countdown,
    on_tick: Option<TickHook>,
    on_expire: Option<ExpireHook>,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `duration_seconds`, replacing any running timer.
    pub fn start(
        &mut self,
        duration_seconds: u32,
        on_tick: impl FnMut(u32) + Send + 'static,
        on_expire: impl FnOnce() + Send + 'static,
    ) {
        self.stop();

        let mut on_tick: TickHook = Box::new(on_tick);
        let initial = self.countdown.start(duration_seconds);
        on_tick(initial);

        self.on_tick = Some(on_tick);
        self.on_expire = Some(Box::new(on_expire));
    }

    /// Cancel the countdown. The expiry callback of the stopped run is dropped
    /// unfired.
    pub fn stop(&mut self) {
        self.countdown.stop();
        self.on_tick = None;
        self.on_expire = None;
    }

    /// Report one elapsed second. Returns `None` when the timer is not running.
    pub fn elapse_second(&mut self) -> Option<TimerEvent> {
        match self.countdown.tick()? {
            CountdownStep::Tick(remaining) => {
                if let Some(on_tick) = self.on_tick.as_mut() {
                    on_tick(remaining);
                }
                Some(TimerEvent::Tick(remaining))
            }
            CountdownStep::Expired => {
                self.on_tick = None;
                if let Some(on_expire) = self.on_expire.take() {
                    on_expire();
                }
                Some(TimerEvent::Expired)
            }
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.countdown.state()
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("state", &self.countdown.state())
            .field("expire_pending", &self.on_expire.is_some())
            .finish_non_exhaustive()
    }
}
