//! Momentum scorer.
//!
//! Percentage returns over 1, 5 and 20 trading days, each tiered on
//! positive momentum, against a fixed 50-point budget.

use std::collections::BTreeMap;

use crate::domain::{bar, Bar, ScoreComponent, Shortfall};
use crate::indicators::{round2, trailing_return};

const MIN_ROWS: usize = 30;

/// Score recent price momentum. Fewer than 30 rows yields the neutral
/// component.
pub fn momentum_score(bars: &[Bar]) -> ScoreComponent {
    if bars.len() < MIN_ROWS {
        return ScoreComponent::neutral(Shortfall::InsufficientData);
    }

    let closes = bar::closes(bars);
    let (Some(ret_1d), Some(ret_5d), Some(ret_20d)) = (
        trailing_return(&closes, 1),
        trailing_return(&closes, 5),
        trailing_return(&closes, 20),
    ) else {
        return ScoreComponent::neutral(Shortfall::ComputationFailed);
    };

    let ret_1d = ret_1d * 100.0;
    let ret_5d = ret_5d * 100.0;
    let ret_20d = ret_20d * 100.0;
    if !ret_1d.is_finite() || !ret_5d.is_finite() || !ret_20d.is_finite() {
        return ScoreComponent::neutral(Shortfall::ComputationFailed);
    }

    let mut detail = BTreeMap::new();
    detail.insert("return_1d".to_string(), round2(ret_1d));
    detail.insert("return_5d".to_string(), round2(ret_5d));
    detail.insert("return_20d".to_string(), round2(ret_20d));

    let mut score = 0.0;
    let mut max_score = 0.0;

    if ret_1d > 2.0 {
        score += 10.0;
    } else if ret_1d > 0.0 {
        score += 5.0;
    }
    max_score += 10.0;

    if ret_5d > 5.0 {
        score += 20.0;
    } else if ret_5d > 0.0 {
        score += 10.0;
    }
    max_score += 20.0;

    if ret_20d > 10.0 {
        score += 20.0;
    } else if ret_20d > 0.0 {
        score += 10.0;
    }
    max_score += 20.0;

    ScoreComponent::scored(round2(score / max_score * 100.0), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NEUTRAL_SCORE;
    use crate::indicators::make_bars;

    #[test]
    fn short_series_is_neutral() {
        let bars = make_bars(&vec![100.0; 29]);
        let component = momentum_score(&bars);
        assert_eq!(component.score(), NEUTRAL_SCORE);
        assert!(component.is_neutral());
    }

    #[test]
    fn flat_series_scores_zero() {
        // Zero returns hit no positive tier: 0 of 50 points.
        let bars = make_bars(&vec![100.0; 40]);
        let component = momentum_score(&bars);
        assert_eq!(component.score(), 0.0);
        assert_eq!(component.detail["return_1d"], 0.0);
        assert_eq!(component.detail["return_20d"], 0.0);
    }

    #[test]
    fn strong_rally_scores_hundred() {
        // +3% every day: all three windows clear their top tier.
        let closes: Vec<f64> = (0..40).map(|i| 100.0 * 1.03f64.powi(i)).collect();
        let bars = make_bars(&closes);
        let component = momentum_score(&bars);
        assert_eq!(component.score(), 100.0);
    }

    #[test]
    fn mild_gain_hits_middle_tiers() {
        // Flat history, then +1% on the final day: 1d > 0 (5), 5d > 0 (10),
        // 20d > 0 (10) → 25/50 = 50.
        let mut closes = vec![100.0; 39];
        closes.push(101.0);
        let bars = make_bars(&closes);
        let component = momentum_score(&bars);
        assert_eq!(component.score(), 50.0);
        assert_eq!(component.detail["return_1d"], 1.0);
    }

    #[test]
    fn selloff_scores_zero() {
        let closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        let bars = make_bars(&closes);
        let component = momentum_score(&bars);
        assert_eq!(component.score(), 0.0);
        assert!(component.detail["return_20d"] < 0.0);
    }
}
