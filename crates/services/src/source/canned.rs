use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{Question, QuizSettings};

use super::{ProviderResponse, QuestionSource};
use crate::error::SourceError;

/// Serves a fixed provider payload through the normal decode/shuffle path.
///
/// Settings are ignored; every fetch yields the same results.
#[derive(Debug, Clone)]
pub struct CannedSource {
    response: ProviderResponse,
    seed: Option<u64>,
}

impl CannedSource {
    #[must_use]
    pub fn new(response: ProviderResponse) -> Self {
        Self {
            response,
            seed: None,
        }
    }

    /// Parse a provider JSON body.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Decode` if the JSON does not match the provider shape.
    pub fn from_json(body: &str) -> Result<Self, SourceError> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    /// Shuffle options with a fixed seed so option order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[async_trait]
impl QuestionSource for CannedSource {
    async fn fetch_questions(&self, _settings: &QuizSettings) -> Result<Vec<Question>, SourceError> {
        let response = self.response.clone();
        match self.seed {
            Some(seed) => response.into_questions(&mut StdRng::seed_from_u64(seed)),
            None => response.into_questions(&mut rand::rng()),
        }
    }
}
