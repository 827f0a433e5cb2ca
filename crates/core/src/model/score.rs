use serde::{Deserialize, Serialize};
use std::fmt;

/// Correct answers out of the questions asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct: u32,
    pub total: u32,
}

impl ScoreSummary {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self { correct, total }
    }

    /// Whole percentage, rounded half-up. Zero when nothing was asked.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let correct = u64::from(self.correct);
        let total = u64::from(self.total);
        let pct = (correct * 200 + total) / (total * 2);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}
