//! Short- and medium-term forecast.
//!
//! Projects the mean of the last 10 daily returns over the horizon,
//! nudged by the recent volume trend, with confidence falling off with
//! return volatility. The medium-term variant is the same routine over
//! weeks x 7 days.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{bar, Assessment, Bar, Shortfall};
use crate::indicators::{daily_returns, mean, round2, sample_stddev, sma};

const MIN_ROWS: usize = 30;

/// Forecast direction over a short horizon.
///
/// Exactly zero predicted change reads as Down: the tie-break is strict
/// `> 0`, kept for behavioral compatibility with the original tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// A directional price forecast over a short/medium horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub current_price: f64,
    pub predicted_price: f64,
    pub predicted_change_pct: f64,
    pub direction: Direction,
    /// 0-100; shrinks as daily-return volatility grows.
    pub confidence: f64,
    pub horizon: String,
}

/// Forecast price movement `days` ahead. Requires at least 30 rows.
pub fn predict_short_term(bars: &[Bar], days: u32) -> Assessment<Prediction> {
    if bars.len() < MIN_ROWS {
        return Assessment::Unavailable(Shortfall::InsufficientData);
    }
    match compute(bars, days) {
        Some(prediction) => Assessment::Ready(prediction),
        None => Assessment::Unavailable(Shortfall::ComputationFailed),
    }
}

/// Forecast `weeks` ahead by projecting the daily routine over weeks x 7.
pub fn predict_medium_term(bars: &[Bar], weeks: u32) -> Assessment<Prediction> {
    predict_short_term(bars, weeks * 7)
}

fn compute(bars: &[Bar], days: u32) -> Option<Prediction> {
    let closes = bar::closes(bars);
    let volumes = bar::volumes(bars);
    let current_price = *closes.last()?;

    let returns = daily_returns(&closes);
    let recent_returns = mean(&returns[returns.len() - 10..]);

    // Ratio of each day's volume to its trailing 20-day average; the trend
    // is the mean of the last 5 ratios.
    let volume_sma = sma(&volumes, 20);
    let ratios: Vec<f64> = volumes
        .iter()
        .zip(&volume_sma)
        .map(|(&v, &avg)| if avg > 0.0 { v / avg } else { f64::NAN })
        .collect();
    let volume_trend = mean(&ratios[ratios.len() - 5..]);

    let volatility = sample_stddev(&returns);
    if !recent_returns.is_finite() || !volume_trend.is_finite() || !volatility.is_finite() {
        return None;
    }

    let mut predicted_change = recent_returns * f64::from(days);
    if volume_trend > 1.2 {
        predicted_change *= 1.1;
    } else if volume_trend < 0.8 {
        predicted_change *= 0.9;
    }

    let predicted_price = current_price * (1.0 + predicted_change);
    let confidence = (100.0 - volatility * 1000.0).clamp(0.0, 100.0);

    let direction = if predicted_change > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    Some(Prediction {
        current_price: round2(current_price),
        predicted_price: round2(predicted_price),
        predicted_change_pct: round2(predicted_change * 100.0),
        direction,
        confidence: round2(confidence),
        horizon: format!("{days} day(s)"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_bars, make_bars_with_volume};

    #[test]
    fn short_series_is_unavailable() {
        let bars = make_bars(&vec![100.0; 29]);
        let result = predict_short_term(&bars, 1);
        assert_eq!(
            result,
            Assessment::Unavailable(Shortfall::InsufficientData)
        );
    }

    #[test]
    fn flat_series_predicts_zero_change_direction_down() {
        // Zero variance: no change, full confidence, and the strict > 0
        // tie-break labels exactly-zero change as Down.
        let bars = make_bars(&vec![100.0; 40]);
        let prediction = predict_short_term(&bars, 1);
        let p = prediction.ready().expect("forecast should be ready");

        assert_eq!(p.predicted_change_pct, 0.0);
        assert_eq!(p.predicted_price, 100.0);
        assert_eq!(p.direction, Direction::Down);
        assert_eq!(p.confidence, 100.0);
    }

    #[test]
    fn uptrend_predicts_up() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let bars = make_bars(&closes);
        let p = predict_short_term(&bars, 1);
        let p = p.ready().unwrap();
        assert_eq!(p.direction, Direction::Up);
        assert!(p.predicted_price > p.current_price);
    }

    #[test]
    fn horizon_scales_predicted_change() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.1).collect();
        let bars = make_bars(&closes);

        let one = predict_short_term(&bars, 1);
        let five = predict_short_term(&bars, 5);
        let one = one.ready().unwrap();
        let five = five.ready().unwrap();

        // Same daily trend projected over 5x the horizon.
        assert!(five.predicted_change_pct > one.predicted_change_pct * 4.0);
        assert_eq!(five.horizon, "5 day(s)");
    }

    #[test]
    fn surging_volume_amplifies_the_move() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.2).collect();

        let flat_vol = vec![1000u64; 40];
        let mut surge_vol = vec![1000u64; 40];
        for v in surge_vol.iter_mut().skip(35) {
            *v = 5000; // recent ratio well above 1.2
        }

        let base = predict_short_term(&make_bars_with_volume(&closes, &flat_vol), 5);
        let amped = predict_short_term(&make_bars_with_volume(&closes, &surge_vol), 5);
        let base = base.ready().unwrap();
        let amped = amped.ready().unwrap();

        assert!(amped.predicted_change_pct > base.predicted_change_pct);
    }

    #[test]
    fn medium_term_delegates_in_weeks() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.1).collect();
        let bars = make_bars(&closes);

        let weekly = predict_medium_term(&bars, 2);
        let daily = predict_short_term(&bars, 14);
        assert_eq!(weekly, daily);
    }

    #[test]
    fn volatile_series_has_low_confidence() {
        let closes: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 100.0 } else { 115.0 })
            .collect();
        let bars = make_bars(&closes);
        let p = predict_short_term(&bars, 1);
        let p = p.ready().unwrap();
        // ~14% daily swings → volatility * 1000 floors the confidence.
        assert_eq!(p.confidence, 0.0);
    }
}
