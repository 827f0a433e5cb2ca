use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use quiz_core::model::{Question, QuizSettings};

use super::{ProviderResponse, QuestionSource};
use crate::config::QuizConfig;
use crate::error::SourceError;

#[derive(Clone, Debug)]
pub struct OpenTdbConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self {
            base_url: QuizConfig::DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(QuizConfig::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenTdbConfig {
    /// Build the `api.php` request URL for the given settings.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidBaseUrl` if the base URL does not parse.
    pub fn request_url(&self, settings: &QuizSettings) -> Result<Url, SourceError> {
        let base = format!("{}/api.php", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", &settings.amount().to_string());
            query.append_pair("type", "multiple");
            if let Some(category) = settings.category() {
                query.append_pair("category", &category.to_string());
            }
            if let Some(difficulty) = settings.difficulty().as_query() {
                query.append_pair("difficulty", difficulty);
            }
        }
        Ok(url)
    }
}

/// HTTP client for the Open Trivia Database.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    config: OpenTdbConfig,
}

impl OpenTdbSource {
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be built.
    pub fn new(config: OpenTdbConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &QuizConfig) -> Result<Self, SourceError> {
        Self::new(config.provider.clone())
    }

    #[must_use]
    pub fn config(&self) -> &OpenTdbConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch_questions(&self, settings: &QuizSettings) -> Result<Vec<Question>, SourceError> {
        let url = self.config.request_url(settings)?;
        debug!(%url, "fetching questions");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "question provider returned an error status");
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        let payload: ProviderResponse = serde_json::from_slice(&body)?;
        debug!(
            response_code = payload.response_code,
            results = payload.results.len(),
            "provider responded"
        );

        payload.into_questions(&mut rand::rng())
    }
}
