use std::env;
use std::time::Duration;

use quiz_core::model::{CategoryId, QuizSettings, SettingsDraft, SettingsError};

use crate::source::OpenTdbConfig;

/// Runtime configuration, read from `QUIZ_*` environment variables.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub provider: OpenTdbConfig,
    pub defaults: SettingsDraft,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl QuizConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://opentdb.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("QUIZ_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        let timeout_secs = lookup("QUIZ_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);

        let defaults = SettingsDraft {
            category: lookup("QUIZ_DEFAULT_CATEGORY")
                .or_else(|| Some(CategoryId::COMPUTERS.to_string())),
            difficulty: lookup("QUIZ_DEFAULT_DIFFICULTY").or_else(|| Some("medium".into())),
            amount: lookup("QUIZ_DEFAULT_AMOUNT"),
            seconds: lookup("QUIZ_DEFAULT_SECONDS"),
        };

        Self {
            provider: OpenTdbConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            defaults,
        }
    }

    /// Settings to pre-fill the setup screen with.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the configured category or difficulty is invalid.
    pub fn default_settings(&self) -> Result<QuizSettings, SettingsError> {
        self.defaults.clone().resolve()
    }
}
