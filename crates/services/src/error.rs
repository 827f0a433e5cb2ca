//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;

/// Errors emitted by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("no questions available for the chosen settings")]
    NoQuestionsAvailable,
    #[error("question provider responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider returned an unusable question: {0}")]
    InvalidQuestion(#[from] QuestionError),
    #[error("invalid provider base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Errors emitted by `QuizEngine`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("No questions available for the chosen settings. Try different options.")]
    NoQuestionsAvailable,
    #[error("Could not load questions: {message}")]
    Transport { message: String },
    #[error("quiz is not accepting this command right now")]
    NotAccepting,
    #[error("current question has not been answered yet")]
    QuestionNotResolved,
    #[error("load result belongs to an abandoned quiz")]
    StaleLoad,
}

impl From<SourceError> for QuizError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NoQuestionsAvailable => QuizError::NoQuestionsAvailable,
            other => QuizError::Transport {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_provider_result_stays_distinct() {
        let err = QuizError::from(SourceError::NoQuestionsAvailable);
        assert!(matches!(err, QuizError::NoQuestionsAvailable));
    }

    #[test]
    fn other_source_failures_become_transport() {
        let err = QuizError::from(SourceError::InvalidQuestion(QuestionError::EmptyText));
        match err {
            QuizError::Transport { message } => {
                assert!(message.contains("question text cannot be empty"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
