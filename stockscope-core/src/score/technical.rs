//! Technical scorer.
//!
//! Six indicator checks against a fixed 100-point budget:
//! RSI(14) 20, MACD(12,26,9) 15, moving averages 25, Bollinger(20,2σ) 20,
//! volume vs. 20-day average 10, ADX(14) 10. The checks are independent;
//! no branch skips a category, so the denominator is always 100.

use std::collections::BTreeMap;

use super::last_finite;
use crate::domain::{bar, Bar, ScoreComponent, Shortfall};
use crate::indicators::{adx, bollinger, macd, round2, rsi, sma};

const MIN_ROWS: usize = 50;

/// Score a price series on technical indicators.
///
/// Fewer than 50 rows, or any indicator coming back non-finite, yields the
/// neutral component (score 50, empty detail).
pub fn technical_score(bars: &[Bar]) -> ScoreComponent {
    if bars.len() < MIN_ROWS {
        return ScoreComponent::neutral(Shortfall::InsufficientData);
    }
    match compute(bars) {
        Some(component) => component,
        None => ScoreComponent::neutral(Shortfall::ComputationFailed),
    }
}

fn compute(bars: &[Bar]) -> Option<ScoreComponent> {
    let closes = bar::closes(bars);
    let volumes = bar::volumes(bars);
    let price = last_finite(&closes)?;
    let current_volume = *volumes.last()?;

    let rsi_now = last_finite(&rsi(&closes, 14))?;
    let macd_series = macd(&closes, 12, 26, 9);
    let macd_now = last_finite(&macd_series.macd)?;
    let signal_now = last_finite(&macd_series.signal)?;
    let sma_20 = last_finite(&sma(&closes, 20))?;
    let sma_50 = last_finite(&sma(&closes, 50))?;
    let bands = bollinger(&closes, 20, 2.0);
    let bb_upper = last_finite(&bands.upper)?;
    let bb_mid = last_finite(&bands.middle)?;
    let bb_lower = last_finite(&bands.lower)?;
    let volume_sma = last_finite(&sma(&volumes, 20))?;
    let adx_now = last_finite(&adx(bars, 14))?;

    // Flat series collapse the bands; zero average volume breaks the ratio.
    // Both are degenerate inputs, not scoreable ones.
    let bb_position = (price - bb_lower) / (bb_upper - bb_lower) * 100.0;
    let volume_ratio = current_volume / volume_sma;
    if !bb_position.is_finite() || !volume_ratio.is_finite() {
        return None;
    }

    let mut score = 0.0;
    let mut max_score = 0.0;
    let mut detail = BTreeMap::new();

    // RSI: reward the stable middle of the band
    detail.insert("rsi".to_string(), round2(rsi_now));
    if 40.0 < rsi_now && rsi_now < 60.0 {
        score += 20.0;
    } else if 30.0 < rsi_now && rsi_now < 70.0 {
        score += 15.0;
    }
    max_score += 20.0;

    // MACD above its signal line
    detail.insert("macd".to_string(), round2(macd_now));
    detail.insert("macd_signal".to_string(), round2(signal_now));
    if macd_now > signal_now {
        score += 15.0;
    }
    max_score += 15.0;

    // Moving average stack
    detail.insert("sma_20".to_string(), round2(sma_20));
    detail.insert("sma_50".to_string(), round2(sma_50));
    if price > sma_20 && sma_20 > sma_50 {
        score += 25.0;
    } else if price > sma_20 {
        score += 15.0;
    }
    max_score += 25.0;

    // Bollinger position
    detail.insert("bb_position".to_string(), round2(bb_position));
    if bb_lower < price && price < bb_upper {
        if price > bb_mid {
            score += 20.0;
        } else {
            score += 10.0;
        }
    }
    max_score += 20.0;

    // Volume above its 20-day average
    detail.insert("volume_ratio".to_string(), round2(volume_ratio));
    if current_volume > volume_sma {
        score += 10.0;
    }
    max_score += 10.0;

    // ADX trend strength
    detail.insert("adx".to_string(), round2(adx_now));
    if adx_now > 25.0 {
        score += 10.0;
    }
    max_score += 10.0;

    Some(ScoreComponent::scored(
        round2(score / max_score * 100.0),
        detail,
    ))
}
