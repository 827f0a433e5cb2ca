mod question;
mod score;
mod session;
mod settings;

pub use question::{Question, QuestionError};
pub use score::ScoreSummary;
pub use session::{AnswerOutcome, SessionState, SessionStateError, SessionStep};
pub use settings::{CategoryId, Difficulty, QuizSettings, SettingsDraft, SettingsError};
