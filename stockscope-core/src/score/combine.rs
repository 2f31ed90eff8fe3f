//! Score combiner — weighted blend of the four components into an overall
//! score, letter rating and star count.
//!
//! Weights and rating thresholds live in one immutable `ScoreConfig` so
//! alternate weighting schemes are testable without touching the scorers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ScoreComponent;
use crate::indicators::round2;

/// Component weights for the overall blend. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub technical: f64,
    pub fundamental: f64,
    pub sentiment: f64,
    pub momentum: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            technical: 0.35,
            fundamental: 0.35,
            sentiment: 0.20,
            momentum: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.technical + self.fundamental + self.sentiment + self.momentum
    }
}

/// Rating cut-offs, each closed below (score == threshold takes the tier).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub strong_buy: f64,
    pub buy: f64,
    pub hold: f64,
    pub sell: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            strong_buy: 80.0,
            buy: 65.0,
            hold: 50.0,
            sell: 35.0,
        }
    }
}

/// Immutable engine configuration, passed in at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub weights: ScoreWeights,
    pub thresholds: RatingThresholds,
}

/// Letter rating for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    StrongSell,
    Sell,
    Hold,
    Buy,
    StrongBuy,
}

impl Rating {
    pub fn from_score(score: f64, thresholds: &RatingThresholds) -> Self {
        if score >= thresholds.strong_buy {
            Rating::StrongBuy
        } else if score >= thresholds.buy {
            Rating::Buy
        } else if score >= thresholds.hold {
            Rating::Hold
        } else if score >= thresholds.sell {
            Rating::Sell
        } else {
            Rating::StrongSell
        }
    }

    pub fn stars(&self) -> u8 {
        match self {
            Rating::StrongBuy => 5,
            Rating::Buy => 4,
            Rating::Hold => 3,
            Rating::Sell => 2,
            Rating::StrongSell => 1,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::StrongBuy => "Strong Buy",
            Rating::Buy => "Buy",
            Rating::Hold => "Hold",
            Rating::Sell => "Sell",
            Rating::StrongSell => "Strong Sell",
        };
        write!(f, "{label}")
    }
}

/// The numeric inputs that went into the blend, after neutral mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub technical: f64,
    pub fundamental: f64,
    pub sentiment: f64,
    pub momentum: f64,
}

/// Overall score with rating, stars and the component breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub value: f64,
    pub rating: Rating,
    pub stars: u8,
    pub components: ComponentScores,
}

/// Blend the component scores into the overall score.
///
/// Degraded components arrive here carrying their neutral 50 via
/// `ScoreComponent::score`; sentiment is the collaborator's opaque
/// 0-100 value (neutral 50 on provider failure, per its contract).
pub fn combine(
    config: &ScoreConfig,
    technical: &ScoreComponent,
    fundamental: &ScoreComponent,
    sentiment: f64,
    momentum: &ScoreComponent,
) -> OverallScore {
    let components = ComponentScores {
        technical: technical.score(),
        fundamental: fundamental.score(),
        sentiment,
        momentum: momentum.score(),
    };

    let weights = &config.weights;
    // Rate the rounded value so exact threshold inputs land on their tier
    // regardless of floating-point error in the weight products.
    let value = round2(
        components.technical * weights.technical
            + components.fundamental * weights.fundamental
            + components.sentiment * weights.sentiment
            + components.momentum * weights.momentum,
    );

    let rating = Rating::from_score(value, &config.thresholds);

    OverallScore {
        value,
        rating,
        stars: rating.stars(),
        components,
    }
}
