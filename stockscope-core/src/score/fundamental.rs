//! Fundamental scorer.
//!
//! Nine valuation/quality tiers against a fixed 100-point budget. An absent
//! metric contributes 0 points but never shrinks the denominator, so
//! sparse fundamentals read as weak rather than unknown-but-perfect.

use std::collections::BTreeMap;

use crate::domain::{Metric, Metrics, ScoreComponent, Shortfall};
use crate::indicators::round2;

/// Score a fundamental metrics mapping. Empty input yields the neutral
/// component.
pub fn fundamental_score(metrics: &Metrics) -> ScoreComponent {
    if metrics.is_empty() {
        return ScoreComponent::neutral(Shortfall::InsufficientData);
    }

    let mut score = 0.0;
    let mut detail = BTreeMap::new();

    // P/E ratio: reward a sane earnings multiple. Max 15.
    if let Some(pe) = metrics.get(Metric::PeRatio).filter(|v| *v > 0.0) {
        detail.insert("pe_ratio".to_string(), round2(pe));
        if 10.0 < pe && pe < 25.0 {
            score += 15.0;
        } else if 5.0 < pe && pe < 35.0 {
            score += 10.0;
        } else {
            score += 5.0;
        }
    }

    // PEG ratio: growth-adjusted valuation. Max 15.
    if let Some(peg) = metrics.get(Metric::PegRatio).filter(|v| *v > 0.0) {
        detail.insert("peg_ratio".to_string(), round2(peg));
        if peg < 1.0 {
            score += 15.0;
        } else if peg < 2.0 {
            score += 10.0;
        } else if peg < 3.0 {
            score += 5.0;
        }
    }

    // Price/book. Max 10.
    if let Some(pb) = metrics.get(Metric::PriceToBook).filter(|v| *v > 0.0) {
        detail.insert("price_to_book".to_string(), round2(pb));
        if pb < 3.0 {
            score += 10.0;
        } else if pb < 5.0 {
            score += 5.0;
        }
    }

    // Debt/equity: lower is healthier. Max 10.
    if let Some(de) = metrics.get(Metric::DebtToEquity) {
        detail.insert("debt_to_equity".to_string(), round2(de));
        if de < 0.5 {
            score += 10.0;
        } else if de < 1.0 {
            score += 7.0;
        } else if de < 2.0 {
            score += 3.0;
        }
    }

    // Return on equity, reported as a percentage. Max 15.
    if let Some(roe) = metrics.get(Metric::Roe) {
        detail.insert("roe".to_string(), round2(roe * 100.0));
        if roe > 0.15 {
            score += 15.0;
        } else if roe > 0.10 {
            score += 10.0;
        } else if roe > 0.05 {
            score += 5.0;
        }
    }

    // Profit margin. Max 10.
    if let Some(margin) = metrics.get(Metric::ProfitMargin) {
        detail.insert("profit_margin".to_string(), round2(margin * 100.0));
        if margin > 0.20 {
            score += 10.0;
        } else if margin > 0.10 {
            score += 7.0;
        } else if margin > 0.05 {
            score += 3.0;
        }
    }

    // Revenue growth. Max 15.
    if let Some(growth) = metrics.get(Metric::RevenueGrowth) {
        detail.insert("revenue_growth".to_string(), round2(growth * 100.0));
        if growth > 0.20 {
            score += 15.0;
        } else if growth > 0.10 {
            score += 10.0;
        } else if growth > 0.05 {
            score += 5.0;
        }
    }

    // Dividend yield. Max 5.
    if let Some(dividend) = metrics.get(Metric::DividendYield) {
        detail.insert("dividend_yield".to_string(), round2(dividend * 100.0));
        if dividend > 0.02 {
            score += 5.0;
        }
    }

    // Beta: reward moderate volatility. Max 5.
    if let Some(beta) = metrics.get(Metric::Beta) {
        detail.insert("beta".to_string(), round2(beta));
        if 0.5 < beta && beta < 1.5 {
            score += 5.0;
        }
    }

    // Denominator is the fixed sum of the tier maxima (= 100).
    ScoreComponent::scored(round2(score), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NEUTRAL_SCORE;

    fn best_case_metrics() -> Metrics {
        [
            (Metric::PeRatio, 18.0),
            (Metric::PegRatio, 0.8),
            (Metric::PriceToBook, 2.0),
            (Metric::DebtToEquity, 0.3),
            (Metric::Roe, 0.22),
            (Metric::ProfitMargin, 0.25),
            (Metric::RevenueGrowth, 0.30),
            (Metric::DividendYield, 0.03),
            (Metric::Beta, 1.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_metrics_is_neutral() {
        let component = fundamental_score(&Metrics::new());
        assert_eq!(component.score(), NEUTRAL_SCORE);
        assert!(component.detail.is_empty());
        assert!(component.is_neutral());
    }

    #[test]
    fn best_case_scores_hundred() {
        let component = fundamental_score(&best_case_metrics());
        assert_eq!(component.score(), 100.0);
        assert_eq!(component.detail.len(), 9);
    }

    #[test]
    fn absent_metrics_do_not_shrink_denominator() {
        // Only a perfect PEG present: 15 points of a fixed 100.
        let metrics: Metrics = [(Metric::PegRatio, 0.5)].into_iter().collect();
        let component = fundamental_score(&metrics);
        assert_eq!(component.score(), 15.0);
    }

    #[test]
    fn negative_pe_is_ignored() {
        let metrics: Metrics = [(Metric::PeRatio, -12.0), (Metric::Beta, 1.0)]
            .into_iter()
            .collect();
        let component = fundamental_score(&metrics);
        // Beta tier only; the loss-making P/E neither scores nor appears.
        assert_eq!(component.score(), 5.0);
        assert!(!component.detail.contains_key("pe_ratio"));
    }

    #[test]
    fn middle_tiers() {
        let metrics: Metrics = [
            (Metric::PeRatio, 30.0),      // 10
            (Metric::DebtToEquity, 0.8),  // 7
            (Metric::Roe, 0.12),          // 10
            (Metric::ProfitMargin, 0.07), // 3
        ]
        .into_iter()
        .collect();
        let component = fundamental_score(&metrics);
        assert_eq!(component.score(), 30.0);
    }

    #[test]
    fn percentage_metrics_reported_as_percent() {
        let metrics: Metrics = [(Metric::Roe, 0.1234)].into_iter().collect();
        let component = fundamental_score(&metrics);
        assert_eq!(component.detail["roe"], 12.34);
    }
}
