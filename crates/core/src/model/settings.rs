use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid category: {raw}")]
    InvalidCategory { raw: String },

    #[error("invalid difficulty: {raw}")]
    InvalidDifficulty { raw: String },
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Provider-side identifier of a trivia category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(u32);

impl CategoryId {
    /// "Science: Computers" on the provider.
    pub const COMPUTERS: CategoryId = CategoryId(18);

    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(CategoryId::new)
            .map_err(|_| SettingsError::InvalidCategory { raw: s.to_string() })
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Any,
}

impl Difficulty {
    /// Value for the provider's `difficulty` parameter; `None` means no filter.
    #[must_use]
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            Difficulty::Easy => Some("easy"),
            Difficulty::Medium => Some("medium"),
            Difficulty::Hard => Some("hard"),
            Difficulty::Any => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query().unwrap_or("any"))
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "any" | "" => Ok(Difficulty::Any),
            _ => Err(SettingsError::InvalidDifficulty { raw: s.to_string() }),
        }
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Quiz configuration chosen on the setup screen.
///
/// `amount` and `seconds_per_question` are clamped into their allowed ranges on
/// construction, so every value of this type is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSettings {
    category: Option<CategoryId>,
    difficulty: Difficulty,
    amount: u32,
    seconds_per_question: u32,
}

impl QuizSettings {
    pub const MIN_AMOUNT: u32 = 3;
    pub const MAX_AMOUNT: u32 = 20;
    pub const DEFAULT_AMOUNT: u32 = 5;
    pub const MIN_SECONDS: u32 = 5;
    pub const MAX_SECONDS: u32 = 60;
    pub const DEFAULT_SECONDS: u32 = 15;

    #[must_use]
    pub fn new(
        category: Option<CategoryId>,
        difficulty: Difficulty,
        amount: u32,
        seconds_per_question: u32,
    ) -> Self {
        Self {
            category,
            difficulty,
            amount: amount.clamp(Self::MIN_AMOUNT, Self::MAX_AMOUNT),
            seconds_per_question: seconds_per_question.clamp(Self::MIN_SECONDS, Self::MAX_SECONDS),
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::new(
            Some(CategoryId::COMPUTERS),
            Difficulty::Medium,
            Self::DEFAULT_AMOUNT,
            Self::DEFAULT_SECONDS,
        )
    }
}

/// Raw setup-form input, before parsing and clamping.
#[derive(Clone, Debug, Default)]
pub struct SettingsDraft {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub amount: Option<String>,
    pub seconds: Option<String>,
}

impl SettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and clamp the draft into settings.
    ///
    /// Missing or non-numeric counts fall back to the defaults before clamping.
    /// A blank category or difficulty means "any".
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` for a non-numeric category or an unknown difficulty.
    pub fn resolve(self) -> Result<QuizSettings, SettingsError> {
        let category = match normalize_optional(self.category) {
            Some(raw) => Some(raw.parse::<CategoryId>()?),
            None => None,
        };
        let difficulty = match normalize_optional(self.difficulty) {
            Some(raw) => raw.parse::<Difficulty>()?,
            None => Difficulty::Any,
        };
        let amount = parse_count(self.amount).unwrap_or(QuizSettings::DEFAULT_AMOUNT);
        let seconds = parse_count(self.seconds).unwrap_or(QuizSettings::DEFAULT_SECONDS);

        Ok(QuizSettings::new(category, difficulty, amount, seconds))
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

// Numeric input may be fractional ("1.5") and is truncated. Zero and
// non-numbers fall back to the default; negatives saturate to the minimum.
fn parse_count(value: Option<String>) -> Option<u32> {
    let raw = normalize_optional(value)?;
    let n = raw.parse::<f64>().ok().filter(|n| !n.is_nan() && *n != 0.0)?;
    if n < 0.0 {
        return Some(0);
    }
    // `as` saturates at u32::MAX, including for infinity.
    Some(n.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: &str, seconds: &str) -> SettingsDraft {
        SettingsDraft {
            category: Some("18".into()),
            difficulty: Some("medium".into()),
            amount: Some(amount.into()),
            seconds: Some(seconds.into()),
        }
    }

    #[test]
    fn new_clamps_amount_and_seconds() {
        let low = QuizSettings::new(None, Difficulty::Easy, 1, 2);
        assert_eq!(low.amount(), 3);
        assert_eq!(low.seconds_per_question(), 5);

        let high = QuizSettings::new(None, Difficulty::Hard, 500, 600);
        assert_eq!(high.amount(), 20);
        assert_eq!(high.seconds_per_question(), 60);
    }

    #[test]
    fn defaults_match_setup_form() {
        let settings = QuizSettings::default();
        assert_eq!(settings.category(), Some(CategoryId::new(18)));
        assert_eq!(settings.difficulty(), Difficulty::Medium);
        assert_eq!(settings.amount(), 5);
        assert_eq!(settings.seconds_per_question(), 15);
    }

    #[test]
    fn draft_falls_back_to_defaults_for_garbage() {
        let settings = draft("lots", "").resolve().unwrap();
        assert_eq!(settings.amount(), 5);
        assert_eq!(settings.seconds_per_question(), 15);
    }

    #[test]
    fn draft_clamps_parsed_values() {
        let settings = draft("-4", "90").resolve().unwrap();
        assert_eq!(settings.amount(), 3);
        assert_eq!(settings.seconds_per_question(), 60);
    }

    #[test]
    fn fractional_counts_truncate_before_clamping() {
        let settings = draft("1.5", "7.9").resolve().unwrap();
        assert_eq!(settings.amount(), 3);
        assert_eq!(settings.seconds_per_question(), 7);

        let settings = draft(" 12 ", "0.5").resolve().unwrap();
        assert_eq!(settings.amount(), 12);
        assert_eq!(settings.seconds_per_question(), 5);
    }

    #[test]
    fn zero_and_nan_counts_use_defaults() {
        let settings = draft("0", "NaN").resolve().unwrap();
        assert_eq!(settings.amount(), 5);
        assert_eq!(settings.seconds_per_question(), 15);
    }

    #[test]
    fn blank_category_and_difficulty_mean_any() {
        let settings = SettingsDraft {
            category: Some("  ".into()),
            difficulty: Some(String::new()),
            ..SettingsDraft::new()
        }
        .resolve()
        .unwrap();
        assert_eq!(settings.category(), None);
        assert_eq!(settings.difficulty(), Difficulty::Any);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = SettingsDraft {
            difficulty: Some("nightmare".into()),
            ..SettingsDraft::new()
        }
        .resolve()
        .unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidDifficulty {
                raw: "nightmare".into()
            }
        );
    }

    #[test]
    fn difficulty_query_values() {
        assert_eq!(Difficulty::Hard.as_query(), Some("hard"));
        assert_eq!(Difficulty::Any.as_query(), None);
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::Any.to_string(), "any");
    }

    #[test]
    fn category_parse_rejects_text() {
        assert!("science".parse::<CategoryId>().is_err());
        assert_eq!(" 9 ".parse::<CategoryId>().unwrap(), CategoryId::new(9));
    }
}
