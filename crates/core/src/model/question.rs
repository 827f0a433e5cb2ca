use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least two options, got {count}")]
    TooFewOptions { count: usize },

    #[error("correct answer must appear exactly once among the options (found {occurrences})")]
    CorrectAnswerCount { occurrences: usize },
}

/// A multiple-choice question ready to be asked.
///
/// The options are stored in presentation order and contain the correct answer
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: String,
    category: String,
    difficulty: String,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, fewer than two options are
    /// given, or the correct answer is missing from or repeated in `options`.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }

        let correct_answer = correct_answer.into();
        let occurrences = options.iter().filter(|o| **o == correct_answer).count();
        if occurrences != 1 {
            return Err(QuestionError::CorrectAnswerCount { occurrences });
        }

        Ok(Self {
            text,
            options,
            correct_answer,
            category: category.into(),
            difficulty: difficulty.into(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    /// Position of the correct answer within `options`.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.correct_answer)
            .unwrap_or_default()
    }

    /// `"Science: Computers • MEDIUM"`
    #[must_use]
    pub fn meta_label(&self) -> String {
        format!(
            "{} \u{2022} {}",
            self.category,
            self.difficulty.to_uppercase()
        )
    }
}
