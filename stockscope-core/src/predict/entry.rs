//! Entry-point classifier.
//!
//! Positions the current price in its 52-week range, reads the MA stack and
//! a rolling-mean RSI, collects qualitative buy-timing tags, and folds them
//! with the overall score into one of four labels, checked in priority
//! order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{bar, Assessment, Bar, Shortfall};
use crate::indicators::{round2, rsi_from_delta, sma};
use crate::score::last_finite;

const MIN_ROWS: usize = 50;
const YEAR_WINDOW: usize = 252;

/// Buy-timing label, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryLabel {
    StrongBuyNow,
    GoodEntryPoint,
    ConsiderBuying,
    WaitForBetterEntry,
}

impl fmt::Display for EntryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryLabel::StrongBuyNow => "Strong Buy Now",
            EntryLabel::GoodEntryPoint => "Good Entry Point",
            EntryLabel::ConsiderBuying => "Consider Buying",
            EntryLabel::WaitForBetterEntry => "Wait for Better Entry",
        };
        write!(f, "{label}")
    }
}

/// Entry assessment with the readings and tags behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySignal {
    pub label: EntryLabel,
    /// Where the price sits in its 52-week range, 0 (low) to 100 (high).
    pub range_position_pct: f64,
    pub rsi: f64,
    pub vs_sma20_pct: f64,
    pub vs_sma50_pct: f64,
    /// Qualitative tags supporting the label, in evaluation order.
    pub supporting_signals: Vec<String>,
}

/// Classify the current price as an entry point, given the overall score.
/// Requires at least 50 rows.
pub fn entry_point(bars: &[Bar], overall_score: f64) -> Assessment<EntrySignal> {
    if bars.len() < MIN_ROWS {
        return Assessment::Unavailable(Shortfall::InsufficientData);
    }
    match compute(bars, overall_score) {
        Some(signal) => Assessment::Ready(signal),
        None => Assessment::Unavailable(Shortfall::ComputationFailed),
    }
}

fn compute(bars: &[Bar], score: f64) -> Option<EntrySignal> {
    let closes = bar::closes(bars);
    let price = last_finite(&closes)?;

    // 52-week range, or full history when shorter. NaN highs/lows drop out
    // of the fold.
    let window = if bars.len() >= YEAR_WINDOW {
        &bars[bars.len() - YEAR_WINDOW..]
    } else {
        bars
    };
    let high_52w = window.iter().map(|b| b.high).fold(f64::NAN, f64::max);
    let low_52w = window.iter().map(|b| b.low).fold(f64::NAN, f64::min);

    let range_position = (price - low_52w) / (high_52w - low_52w) * 100.0;
    if !range_position.is_finite() {
        return None;
    }

    let sma_20 = last_finite(&sma(&closes, 20))?;
    let sma_50 = last_finite(&sma(&closes, 50))?;
    let rsi = last_finite(&rsi_from_delta(&closes, 14))?;

    let mut signals = Vec::new();
    if range_position < 40.0 {
        signals.push("Near 52-week low".to_string());
    }
    if price < sma_20 && sma_20 < sma_50 && score > 60.0 {
        signals.push("Price below MA with good fundamentals".to_string());
    }
    if rsi < 40.0 {
        signals.push("RSI oversold".to_string());
    }
    if price > sma_20 && score > 70.0 {
        signals.push("Strong uptrend with high score".to_string());
    }

    let label = if score > 70.0 && signals.len() >= 2 {
        EntryLabel::StrongBuyNow
    } else if score > 60.0 && (rsi < 40.0 || range_position < 40.0) {
        EntryLabel::GoodEntryPoint
    } else if score > 50.0 {
        EntryLabel::ConsiderBuying
    } else {
        EntryLabel::WaitForBetterEntry
    };

    Some(EntrySignal {
        label,
        range_position_pct: round2(range_position),
        rsi: round2(rsi),
        vs_sma20_pct: round2((price / sma_20 - 1.0) * 100.0),
        vs_sma50_pct: round2((price / sma_50 - 1.0) * 100.0),
        supporting_signals: signals,
    })
}
