use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Difficulty level for the number guessing game
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Level {
    /// The range from which the secret number is drawn
    pub(crate) fn range(self) -> RangeInclusive<u32> {
        match self {
            Level::Easy => 1..=10,
            Level::Medium => 1..=50,
            Level::Hard => 1..=100,
            Level::Expert => 1..=1000,
        }
    }

    pub(crate) fn max_attempts(self) -> u32 {
        match self {
            Level::Easy => 5,
            Level::Medium => 7,
            Level::Hard => 10,
            Level::Expert => 15,
        }
    }

    pub(crate) fn max_hints(self) -> u32 {
        match self {
            Level::Easy => 2,
            Level::Medium => 3,
            Level::Hard => 4,
            Level::Expert => 5,
        }
    }

    /// Number of decimal digits needed to type the largest possible guess
    pub(crate) fn max_digits(self) -> usize {
        self.range().end().to_string().len()
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
            Level::Expert => "Expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
