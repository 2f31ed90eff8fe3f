//! Degraded-result conventions shared by scorers and predictors.
//!
//! Thin or degenerate data never aborts an analysis. Each component keeps
//! the distinction between "computed", "not enough rows", and "computation
//! blew up" visible in its result type; the mapping to the numeric neutral
//! value happens in exactly one place (`ScoreComponent::score`), at the
//! combiner boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The neutral score every degraded component contributes to the blend.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Why a component could not produce a computed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortfall {
    /// Row count below the component's minimum.
    InsufficientData,
    /// Degenerate input made an intermediate value non-finite.
    ComputationFailed,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::InsufficientData => write!(f, "Insufficient data"),
            Shortfall::ComputationFailed => write!(f, "Error"),
        }
    }
}

/// A component score: either computed, or neutral with a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOutcome {
    Scored(f64),
    Neutral(Shortfall),
}

/// Score plus the raw indicator readings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub outcome: ScoreOutcome,
    /// Raw readings behind the score (rounded to 2 decimals), kept for
    /// explainability. Empty when the outcome is neutral.
    pub detail: BTreeMap<String, f64>,
}

impl ScoreComponent {
    pub fn scored(score: f64, detail: BTreeMap<String, f64>) -> Self {
        Self {
            outcome: ScoreOutcome::Scored(score),
            detail,
        }
    }

    pub fn neutral(reason: Shortfall) -> Self {
        Self {
            outcome: ScoreOutcome::Neutral(reason),
            detail: BTreeMap::new(),
        }
    }

    /// The numeric score for the blend: computed value, or the neutral 50.
    pub fn score(&self) -> f64 {
        match self.outcome {
            ScoreOutcome::Scored(v) => v,
            ScoreOutcome::Neutral(_) => NEUTRAL_SCORE,
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self.outcome, ScoreOutcome::Neutral(_))
    }
}

/// A predictor result: ready, or unavailable with a reason.
///
/// Unlike scores there is no meaningful neutral forecast, so consumers
/// branch on readiness instead of reading through a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment<T> {
    Ready(T),
    Unavailable(Shortfall),
}

impl<T> Assessment<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Assessment::Ready(v) => Some(v),
            Assessment::Unavailable(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Assessment::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Assessment<U> {
        match self {
            Assessment::Ready(v) => Assessment::Ready(f(v)),
            Assessment::Unavailable(s) => Assessment::Unavailable(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_component_scores_fifty() {
        let c = ScoreComponent::neutral(Shortfall::InsufficientData);
        assert_eq!(c.score(), NEUTRAL_SCORE);
        assert!(c.detail.is_empty());
        assert!(c.is_neutral());
    }

    #[test]
    fn scored_component_keeps_value() {
        let c = ScoreComponent::scored(72.5, BTreeMap::new());
        assert_eq!(c.score(), 72.5);
        assert!(!c.is_neutral());
    }

    #[test]
    fn assessment_ready_accessor() {
        let a: Assessment<u32> = Assessment::Ready(7);
        assert_eq!(a.ready(), Some(&7));

        let u: Assessment<u32> = Assessment::Unavailable(Shortfall::InsufficientData);
        assert_eq!(u.ready(), None);
        assert!(!u.is_ready());
    }

    #[test]
    fn shortfall_display_labels() {
        assert_eq!(Shortfall::InsufficientData.to_string(), "Insufficient data");
        assert_eq!(Shortfall::ComputationFailed.to_string(), "Error");
    }
}
