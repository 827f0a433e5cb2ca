//! Real-time tick delivery for the quiz timer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::quiz::QuizEngine;

/// Source of one-second ticks.
#[async_trait]
pub trait TickSource: Send {
    /// Wait until the next second has elapsed.
    async fn next_tick(&mut self);
}

/// Ticks from a tokio interval. The first tick arrives one period after creation.
#[derive(Debug)]
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    #[must_use]
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Spawn a task feeding `ticks` into the engine.
///
/// The task holds only a weak reference and exits once the engine is dropped.
pub fn spawn_ticker<T>(engine: &Arc<Mutex<QuizEngine>>, mut ticks: T) -> JoinHandle<()>
where
    T: TickSource + 'static,
{
    let engine = Arc::downgrade(engine);
    tokio::spawn(async move {
        loop {
            ticks.next_tick().await;
            let Some(engine) = engine.upgrade() else {
                debug!("engine dropped, stopping ticker");
                break;
            };
            engine.lock().await.elapse_second();
        }
    })
}
