//! Ranking and filter pipelines over batch results.
//!
//! All sorts are descending and stable on f64 keys via `total_cmp`;
//! filters mirror the scan presets (value, gainers, weekly, long-term,
//! buy-now).

use serde::{Deserialize, Serialize};

use crate::analyzer::StockAnalysis;
use stockscope_core::predict::{Direction, EntryLabel};

/// Which component a ranking sorts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Overall,
    Momentum,
    Value,
    Technical,
    Sentiment,
}

impl SortKey {
    fn key(&self, analysis: &StockAnalysis) -> f64 {
        match self {
            SortKey::Overall => analysis.overall.value,
            SortKey::Momentum => analysis.momentum.score(),
            SortKey::Value => analysis.fundamental.score(),
            SortKey::Technical => analysis.technical.score(),
            SortKey::Sentiment => analysis.sentiment_score,
        }
    }
}

/// Sort analyses by the given key, best first.
pub fn rank(mut analyses: Vec<StockAnalysis>, sort_by: SortKey) -> Vec<StockAnalysis> {
    analyses.sort_by(|a, b| sort_by.key(b).total_cmp(&sort_by.key(a)));
    analyses
}

/// Top picks by overall score.
pub fn top_picks(analyses: Vec<StockAnalysis>, count: usize) -> Vec<StockAnalysis> {
    let mut ranked = rank(analyses, SortKey::Overall);
    ranked.truncate(count);
    ranked
}

/// Best value: solid fundamentals (>= 50), ranked by fundamental score.
pub fn best_value(analyses: Vec<StockAnalysis>, count: usize) -> Vec<StockAnalysis> {
    let mut picks: Vec<StockAnalysis> = analyses
        .into_iter()
        .filter(|a| a.fundamental.score() >= 50.0)
        .collect();
    picks.sort_by(|a, b| b.fundamental.score().total_cmp(&a.fundamental.score()));
    picks.truncate(count);
    picks
}

/// Predicted gainers for tomorrow: forecast Up with a decent overall
/// score, ranked by momentum then predicted change.
pub fn top_gainers(analyses: Vec<StockAnalysis>, count: usize) -> Vec<StockAnalysis> {
    let mut gainers: Vec<StockAnalysis> = analyses
        .into_iter()
        .filter(|a| {
            a.overall.value >= 50.0
                && a.forecasts
                    .tomorrow
                    .ready()
                    .is_some_and(|p| p.direction == Direction::Up)
        })
        .collect();

    gainers.sort_by(|a, b| {
        let change = |x: &StockAnalysis| {
            x.forecasts
                .tomorrow
                .ready()
                .map(|p| p.predicted_change_pct)
                .unwrap_or(f64::MIN)
        };
        b.momentum
            .score()
            .total_cmp(&a.momentum.score())
            .then(change(b).total_cmp(&change(a)))
    });
    gainers.truncate(count);
    gainers
}

/// Picks for the week: overall >= 55, ranked by overall score then the
/// next-week forecast.
pub fn weekly_picks(analyses: Vec<StockAnalysis>, count: usize) -> Vec<StockAnalysis> {
    let mut picks: Vec<StockAnalysis> = analyses
        .into_iter()
        .filter(|a| a.overall.value >= 55.0)
        .collect();

    picks.sort_by(|a, b| {
        let change = |x: &StockAnalysis| {
            x.forecasts
                .next_week
                .ready()
                .map(|p| p.predicted_change_pct)
                .unwrap_or(f64::MIN)
        };
        b.overall
            .value
            .total_cmp(&a.overall.value)
            .then(change(b).total_cmp(&change(a)))
    });
    picks.truncate(count);
    picks
}

/// Quality long-term holds: overall >= 60 and fundamentals >= 55.
pub fn long_term_picks(analyses: Vec<StockAnalysis>, count: usize) -> Vec<StockAnalysis> {
    let picks: Vec<StockAnalysis> = analyses
        .into_iter()
        .filter(|a| a.overall.value >= 60.0 && a.fundamental.score() >= 55.0)
        .collect();
    top_picks(picks, count)
}

/// Stocks to buy right now: overall >= 65 with a strong/good entry label.
pub fn buy_now(analyses: Vec<StockAnalysis>, count: usize) -> Vec<StockAnalysis> {
    let picks: Vec<StockAnalysis> = analyses
        .into_iter()
        .filter(|a| {
            a.overall.value >= 65.0
                && a.entry.ready().is_some_and(|e| {
                    matches!(
                        e.label,
                        EntryLabel::StrongBuyNow | EntryLabel::GoodEntryPoint
                    )
                })
        })
        .collect();
    top_picks(picks, count)
}
