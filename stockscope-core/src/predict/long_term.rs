//! Long-term forecast.
//!
//! Blends trailing 3/6/12-month growth (0.5/0.3/0.2), annualizes the blend
//! as a quarterly rate (x4), and scales it to the requested horizon. Each
//! growth window falls back to the next shorter one when the series is too
//! short. Confidence carries a 0.7 haircut for the structurally higher
//! long-horizon uncertainty.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{bar, Assessment, Bar, Shortfall};
use crate::indicators::{daily_returns, round2, sample_stddev};

const MIN_ROWS: usize = 100;

/// Long-horizon direction, deliberately distinct vocabulary from the
/// short-term Up/Down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Bullish,
    Bearish,
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outlook::Bullish => write!(f, "Bullish"),
            Outlook::Bearish => write!(f, "Bearish"),
        }
    }
}

/// A long-horizon price forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermPrediction {
    pub current_price: f64,
    pub predicted_price: f64,
    pub predicted_change_pct: f64,
    pub outlook: Outlook,
    pub confidence: f64,
    pub horizon: String,
    /// The annualized growth estimate the projection is built on.
    pub annual_growth_pct: f64,
}

/// Forecast `months` ahead. Requires at least 100 rows.
pub fn predict_long_term(bars: &[Bar], months: u32) -> Assessment<LongTermPrediction> {
    if bars.len() < MIN_ROWS {
        return Assessment::Unavailable(Shortfall::InsufficientData);
    }
    match compute(bars, months) {
        Some(prediction) => Assessment::Ready(prediction),
        None => Assessment::Unavailable(Shortfall::ComputationFailed),
    }
}

fn compute(bars: &[Bar], months: u32) -> Option<LongTermPrediction> {
    let closes = bar::closes(bars);
    let current_price = *closes.last()?;

    // Trailing growth over ~3/6/12 months of trading days, each window
    // falling back to the shorter one when history runs out.
    let growth_3m = growth_over(&closes, 63).unwrap_or(0.0);
    let growth_6m = growth_over(&closes, 126).unwrap_or(growth_3m);
    let growth_12m = growth_over(&closes, 252).unwrap_or(growth_6m);

    let avg_growth = growth_3m * 0.5 + growth_6m * 0.3 + growth_12m * 0.2;
    let annual_growth = avg_growth * 4.0;
    let predicted_growth = annual_growth * (f64::from(months) / 12.0);
    let predicted_price = current_price * (1.0 + predicted_growth);

    let returns_std = sample_stddev(&daily_returns(&closes));
    if !predicted_growth.is_finite() || !returns_std.is_finite() {
        return None;
    }
    let confidence = (100.0 - returns_std * 800.0).clamp(0.0, 100.0) * 0.7;

    let outlook = if predicted_growth > 0.0 {
        Outlook::Bullish
    } else {
        Outlook::Bearish
    };

    Some(LongTermPrediction {
        current_price: round2(current_price),
        predicted_price: round2(predicted_price),
        predicted_change_pct: round2(predicted_growth * 100.0),
        outlook,
        confidence: round2(confidence),
        horizon: format!("{months} month(s)"),
        annual_growth_pct: round2(annual_growth * 100.0),
    })
}

/// Growth from `window` rows back to the last row, using the close at
/// index len - window as the base.
fn growth_over(closes: &[f64], window: usize) -> Option<f64> {
    let n = closes.len();
    if n < window {
        return None;
    }
    let base = closes[n - window];
    let last = closes[n - 1];
    if base.is_nan() || last.is_nan() || base == 0.0 {
        return None;
    }
    Some((last - base) / base)
}
