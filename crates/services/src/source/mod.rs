//! Question sources: where a quiz gets its questions from.

mod canned;
mod entities;
mod opentdb;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::warn;

use quiz_core::model::{Question, QuizSettings};

use crate::error::SourceError;

pub use canned::CannedSource;
pub use entities::decode_html_entities;
pub use opentdb::{OpenTdbConfig, OpenTdbSource};

/// Contract for anything that can supply questions for given settings.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch decoded, shuffled questions.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NoQuestionsAvailable` when the provider has nothing
    /// for these settings, or another `SourceError` for transport failures.
    async fn fetch_questions(&self, settings: &QuizSettings) -> Result<Vec<Question>, SourceError>;
}

/// Provider response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse {
    pub response_code: i64,
    #[serde(default)]
    pub results: Vec<ProviderQuestion>,
}

/// One raw, still HTML-escaped question.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderQuestion {
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

impl ProviderResponse {
    /// Turn a provider payload into questions, decoding text and shuffling options.
    ///
    /// Results that do not form a valid question (for example a wrong answer
    /// that repeats the correct one) are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NoQuestionsAvailable` for a non-zero response code or
    /// when no usable result is left.
    pub fn into_questions<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Vec<Question>, SourceError> {
        if self.response_code != 0 {
            return Err(SourceError::NoQuestionsAvailable);
        }

        let questions: Vec<Question> = self
            .results
            .into_iter()
            .filter_map(|raw| match raw.into_question(rng) {
                Ok(question) => Some(question),
                Err(err) => {
                    warn!(error = %err, "skipping unusable provider question");
                    None
                }
            })
            .collect();

        if questions.is_empty() {
            return Err(SourceError::NoQuestionsAvailable);
        }
        Ok(questions)
    }
}

impl ProviderQuestion {
    fn into_question<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Question, SourceError> {
        let correct = decode_html_entities(&self.correct_answer);
        let mut options = Vec::with_capacity(self.incorrect_answers.len() + 1);
        options.push(correct.clone());
        options.extend(self.incorrect_answers.iter().map(|a| decode_html_entities(a)));
        options.shuffle(rng);

        Ok(Question::new(
            decode_html_entities(&self.question),
            options,
            correct,
            decode_html_entities(&self.category),
            decode_html_entities(&self.difficulty),
        )?)
    }
}
