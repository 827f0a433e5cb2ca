mod engine;
mod observer;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use engine::{Advance, AnswerFeedback, EnginePhase, LoadTicket, QuizEngine};
pub use observer::{NoopObserver, QuizObserver};
pub use view::{OptionState, OptionView, QuestionView, QuizResult, QuizSnapshot};
