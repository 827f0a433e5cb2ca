use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, QuizSettings, ScoreSummary};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("a session needs at least one question")]
    Empty,

    #[error("session already completed")]
    Completed,

    #[error("current question already has an answer")]
    AlreadyResolved,

    #[error("current question has not been answered yet")]
    Unresolved,
}

/// How a single question was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct { choice: String },
    Incorrect { choice: String },
    /// The countdown ran out before any choice was made.
    TimedOut,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }

    #[must_use]
    pub fn choice(&self) -> Option<&str> {
        match self {
            AnswerOutcome::Correct { choice } | AnswerOutcome::Incorrect { choice } => {
                Some(choice)
            }
            AnswerOutcome::TimedOut => None,
        }
    }
}

/// Where the session stands after moving past a resolved question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Next(usize),
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Questions, position and score of one quiz run.
///
/// `current == questions.len()` marks the session complete. `outcomes` holds one
/// entry per resolved question, so the current question is resolved exactly when
/// `outcomes.len() > current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    settings: QuizSettings,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    outcomes: Vec<AnswerOutcome>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// # Errors
    ///
    /// Returns `SessionStateError::Empty` if `questions` is empty.
    pub fn new(
        settings: QuizSettings,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionStateError> {
        if questions.is_empty() {
            return Err(SessionStateError::Empty);
        }

        Ok(Self {
            settings,
            outcomes: Vec::with_capacity(questions.len()),
            questions,
            current: 0,
            score: 0,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Outcome recorded for the current question, if any.
    #[must_use]
    pub fn current_outcome(&self) -> Option<&AnswerOutcome> {
        self.outcomes.get(self.current)
    }

    #[must_use]
    pub fn is_current_resolved(&self) -> bool {
        !self.is_complete() && self.outcomes.len() > self.current
    }

    #[must_use]
    pub fn score_summary(&self) -> ScoreSummary {
        ScoreSummary::new(
            self.score,
            u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
        )
    }

    /// Record `choice` for the current question, scoring it against the correct answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Completed` after the last question, or
    /// `SessionStateError::AlreadyResolved` if the question was already resolved.
    pub fn record_answer(&mut self, choice: &str) -> Result<&AnswerOutcome, SessionStateError> {
        let question = self.unresolved_question()?;
        let outcome = if question.is_correct(choice) {
            AnswerOutcome::Correct {
                choice: choice.to_string(),
            }
        } else {
            AnswerOutcome::Incorrect {
                choice: choice.to_string(),
            }
        };

        if outcome.is_correct() {
            self.score = self.score.saturating_add(1);
        }
        self.push_outcome(outcome)
    }

    /// Resolve the current question as unanswered.
    ///
    /// # Errors
    ///
    /// Same as [`SessionState::record_answer`].
    pub fn record_timeout(&mut self) -> Result<&AnswerOutcome, SessionStateError> {
        self.unresolved_question()?;
        self.push_outcome(AnswerOutcome::TimedOut)
    }

    /// Move past the current, resolved question.
    ///
    /// Completing the last question stamps `completed_at` with `at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Completed` if already complete, or
    /// `SessionStateError::Unresolved` if the current question has no outcome.
    pub fn advance(&mut self, at: DateTime<Utc>) -> Result<SessionStep, SessionStateError> {
        if self.is_complete() {
            return Err(SessionStateError::Completed);
        }
        if !self.is_current_resolved() {
            return Err(SessionStateError::Unresolved);
        }

        self.current += 1;
        if self.is_complete() {
            self.completed_at = Some(at);
            return Ok(SessionStep::Completed);
        }
        Ok(SessionStep::Next(self.current))
    }

    fn unresolved_question(&self) -> Result<&Question, SessionStateError> {
        if self.is_current_resolved() {
            return Err(SessionStateError::AlreadyResolved);
        }
        self.current_question().ok_or(SessionStateError::Completed)
    }

    fn push_outcome(&mut self, outcome: AnswerOutcome) -> Result<&AnswerOutcome, SessionStateError> {
        self.outcomes.push(outcome);
        self.outcomes.last().ok_or(SessionStateError::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixed_now;

    fn question(n: usize) -> Question {
        Question::new(
            format!("Q{n}"),
            vec![format!("right{n}"), format!("wrong{n}")],
            format!("right{n}"),
            "General Knowledge",
            "easy",
        )
        .unwrap()
    }

    fn session(len: usize) -> SessionState {
        SessionState::new(
            QuizSettings::default(),
            (0..len).map(question).collect(),
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn empty_session_returns_error() {
        let err = SessionState::new(QuizSettings::default(), Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, SessionStateError::Empty);
    }

    #[test]
    fn answers_score_and_resolve() {
        let mut s = session(2);
        assert!(!s.is_current_resolved());

        let outcome = s.record_answer("right0").unwrap();
        assert!(outcome.is_correct());
        assert_eq!(s.score(), 1);
        assert!(s.is_current_resolved());

        let err = s.record_answer("right0").unwrap_err();
        assert_eq!(err, SessionStateError::AlreadyResolved);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn advance_requires_resolution() {
        let mut s = session(2);
        assert_eq!(s.advance(fixed_now()), Err(SessionStateError::Unresolved));

        s.record_timeout().unwrap();
        assert_eq!(s.current_outcome(), Some(&AnswerOutcome::TimedOut));
        assert_eq!(s.advance(fixed_now()), Ok(SessionStep::Next(1)));
        assert_eq!(s.current_index(), 1);
        assert!(s.current_outcome().is_none());
    }

    #[test]
    fn completing_freezes_score() {
        let mut s = session(2);
        s.record_answer("right0").unwrap();
        s.advance(fixed_now()).unwrap();
        s.record_answer("wrong1").unwrap();
        assert_eq!(s.advance(fixed_now()), Ok(SessionStep::Completed));

        assert!(s.is_complete());
        assert_eq!(s.completed_at(), Some(fixed_now()));
        assert_eq!(s.record_answer("right1"), Err(SessionStateError::Completed));
        assert_eq!(s.record_timeout(), Err(SessionStateError::Completed));
        assert_eq!(s.advance(fixed_now()), Err(SessionStateError::Completed));
        assert_eq!(s.score_summary(), ScoreSummary::new(1, 2));
    }

    #[test]
    fn outcome_choice_accessor() {
        let correct = AnswerOutcome::Correct {
            choice: "x".into(),
        };
        assert_eq!(correct.choice(), Some("x"));
        assert_eq!(AnswerOutcome::TimedOut.choice(), None);
        assert!(!AnswerOutcome::TimedOut.is_correct());
    }
}
