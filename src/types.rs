//! Result types returned by the scorer and the breach checker.

use std::fmt;

use crate::breach::BreachError;

/// Strength category derived from the total score.
///
/// Ordered from weakest to strongest, so `Weak < Moderate < Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthCategory {
    Weak,
    Moderate,
    Strong,
}

impl StrengthCategory {
    pub fn label(self) -> &'static str {
        match self {
            StrengthCategory::Weak => "Weak",
            StrengthCategory::Moderate => "Moderate",
            StrengthCategory::Strong => "Strong",
        }
    }

    /// Colour a front-end uses to render the label.
    pub fn color(self) -> &'static str {
        match self {
            StrengthCategory::Weak => "red",
            StrengthCategory::Moderate => "orange",
            StrengthCategory::Strong => "green",
        }
    }
}

impl fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points contributed by each section of the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubScores {
    pub length: f64,
    pub digits: f64,
    pub special: f64,
    pub uppercase: f64,
}

impl SubScores {
    pub fn total(&self) -> f64 {
        self.length + self.digits + self.special + self.uppercase
    }
}

/// Outcome of a strength evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub category: StrengthCategory,
    /// Sum of all sub-scores, in `[0, 100]` with the default configuration.
    pub score: f64,
    pub breakdown: SubScores,
    /// One hint per section that did not reach its maximum.
    pub reasons: Vec<String>,
}

impl ScoreResult {
    pub fn is_strong(&self) -> bool {
        self.category == StrengthCategory::Strong
    }
}

/// Two-valued breach outcome.
///
/// A failed lookup is indistinguishable from "not found" here; use
/// [`BreachStatus`] when that difference matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreachResult {
    pub found: bool,
    pub count: u64,
}

/// Breach outcome that keeps lookup failures apart from clean results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreachStatus {
    /// The password hash appears in the breach corpus `count` times.
    Breached(u64),
    NotBreached,
    LookupFailed(BreachError),
}

impl BreachStatus {
    pub fn is_breached(&self) -> bool {
        matches!(self, BreachStatus::Breached(_))
    }

    /// Occurrence count, `0` unless breached.
    pub fn count(&self) -> u64 {
        match self {
            BreachStatus::Breached(count) => *count,
            _ => 0,
        }
    }
}

impl From<&BreachStatus> for BreachResult {
    fn from(status: &BreachStatus) -> Self {
        match status {
            BreachStatus::Breached(count) => BreachResult {
                found: true,
                count: *count,
            },
            BreachStatus::NotBreached | BreachStatus::LookupFailed(_) => BreachResult::default(),
        }
    }
}

impl From<BreachStatus> for BreachResult {
    fn from(status: BreachStatus) -> Self {
        BreachResult::from(&status)
    }
}
