#![forbid(unsafe_code)]

pub mod countdown;
pub mod model;
pub mod testing;
pub mod time;

pub use countdown::{Countdown, CountdownStep, TimerState, Urgency};
pub use time::Clock;
