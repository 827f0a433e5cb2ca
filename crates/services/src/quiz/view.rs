use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::TimerState;
use quiz_core::model::{AnswerOutcome, ScoreSummary, SessionState};

use super::engine::EnginePhase;

/// Everything a presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSnapshot {
    pub phase: EnginePhase,
    pub question: Option<QuestionView>,
    pub timer: TimerState,
    pub score: ScoreSummary,
    pub result: Option<QuizResult>,
}

/// Display state of one answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionState {
    Idle,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub state: OptionState,
}

/// The question on screen, with the answer revealed once it is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub counter_label: String,
    pub meta_label: String,
    pub text: String,
    pub options: Vec<OptionView>,
    pub resolution: Option<AnswerOutcome>,
}

impl QuestionView {
    #[must_use]
    pub fn from_session(session: &SessionState) -> Option<Self> {
        let question = session.current_question()?;
        let index = session.current_index();
        let total = session.total();
        let resolution = session.current_outcome().cloned();

        let chosen = resolution.as_ref().and_then(AnswerOutcome::choice);
        let options = question
            .options()
            .iter()
            .map(|text| {
                let state = match (&resolution, chosen) {
                    (None, _) => OptionState::Idle,
                    (Some(_), _) if question.is_correct(text) => OptionState::Correct,
                    (Some(_), Some(choice)) if choice == text.as_str() => OptionState::Wrong,
                    (Some(_), _) => OptionState::Idle,
                };
                OptionView {
                    text: text.clone(),
                    state,
                }
            })
            .collect();

        Some(Self {
            index,
            total,
            counter_label: format!("Q{} of {}", index + 1, total),
            meta_label: question.meta_label(),
            text: question.text().to_string(),
            options,
            resolution,
        })
    }

    /// Whether the "next" control should be offered.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.resolution.is_some()
    }
}

/// Final outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: ScoreSummary,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub outcomes: Vec<AnswerOutcome>,
}

impl QuizResult {
    /// `None` until the session is complete.
    #[must_use]
    pub fn from_session(session: &SessionState) -> Option<Self> {
        let completed_at = session.completed_at()?;
        Some(Self {
            score: session.score_summary(),
            started_at: session.started_at(),
            completed_at,
            outcomes: session.outcomes().to_vec(),
        })
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.score.percent()
    }

    /// `"2 / 5"`
    #[must_use]
    pub fn score_line(&self) -> String {
        self.score.to_string()
    }

    /// `"40%"`
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent())
    }

    #[must_use]
    pub fn timed_out(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, AnswerOutcome::TimedOut))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuizSettings};
    use quiz_core::testing::fixed_now;

    fn session() -> SessionState {
        let q = Question::new(
            "Which planet is largest?",
            vec!["Mars".into(), "Jupiter".into(), "Venus".into()],
            "Jupiter",
            "Science &amp; Nature",
            "medium",
        )
        .unwrap();
        SessionState::new(QuizSettings::default(), vec![q], fixed_now()).unwrap()
    }

    #[test]
    fn unresolved_question_shows_idle_options() {
        let view = QuestionView::from_session(&session()).unwrap();
        assert_eq!(view.counter_label, "Q1 of 1");
        assert_eq!(view.meta_label, "Science &amp; Nature \u{2022} MEDIUM");
        assert!(view.options.iter().all(|o| o.state == OptionState::Idle));
        assert!(!view.can_advance());
    }

    #[test]
    fn wrong_answer_marks_choice_and_reveals_correct() {
        let mut s = session();
        s.record_answer("Mars").unwrap();
        let view = QuestionView::from_session(&s).unwrap();

        let states: Vec<_> = view.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            vec![OptionState::Wrong, OptionState::Correct, OptionState::Idle]
        );
        assert!(view.can_advance());
    }

    #[test]
    fn timeout_reveals_only_correct() {
        let mut s = session();
        s.record_timeout().unwrap();
        let view = QuestionView::from_session(&s).unwrap();
        let states: Vec<_> = view.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            vec![OptionState::Idle, OptionState::Correct, OptionState::Idle]
        );
    }

    #[test]
    fn result_labels() {
        let mut s = session();
        s.record_timeout().unwrap();
        s.advance(fixed_now()).unwrap();

        let result = QuizResult::from_session(&s).unwrap();
        assert_eq!(result.score_line(), "0 / 1");
        assert_eq!(result.percent_label(), "0%");
        assert_eq!(result.timed_out(), 1);
        assert!(QuestionView::from_session(&s).is_none());
    }
}
