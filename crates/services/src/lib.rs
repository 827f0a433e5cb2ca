#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod logging;
pub mod quiz;
pub mod source;
pub mod ticker;
pub mod timer;

pub use quiz_core::Clock;

pub use config::QuizConfig;
pub use error::{QuizError, SourceError};
pub use quiz::{
    Advance, AnswerFeedback, EnginePhase, LoadTicket, NoopObserver, QuizEngine, QuizObserver,
    QuizResult, QuizSnapshot,
};
pub use source::{CannedSource, OpenTdbConfig, OpenTdbSource, QuestionSource};
pub use ticker::{IntervalTicks, TickSource, spawn_ticker};
pub use timer::{Timer, TimerEvent};
