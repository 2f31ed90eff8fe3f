//! Target price and stop loss.
//!
//! Pure function of (current price, overall score): the score picks an
//! upside tier for the target and a protective stop tier below the price.
//! A non-positive price is a precondition violation and surfaces as a hard
//! error, unlike the data-driven fallbacks elsewhere in the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::round2;

#[derive(Debug, Error, PartialEq)]
pub enum TargetPriceError {
    #[error("current price must be a positive, finite number (got {0})")]
    InvalidPrice(f64),
}

/// Target/stop pair with the risk/reward framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPrice {
    pub target_price: f64,
    pub stop_loss: f64,
    pub upside_pct: f64,
    pub downside_pct: f64,
    /// Upside over downside. Reported unrounded.
    pub risk_reward_ratio: f64,
}

/// Derive the target price and stop loss from the overall score.
pub fn target_price(current_price: f64, score: f64) -> Result<TargetPrice, TargetPriceError> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(TargetPriceError::InvalidPrice(current_price));
    }

    let upside = if score >= 80.0 {
        0.25
    } else if score >= 65.0 {
        0.15
    } else if score >= 50.0 {
        0.10
    } else {
        0.05
    };

    let stop_fraction = if score >= 70.0 {
        0.92
    } else if score >= 50.0 {
        0.90
    } else {
        0.85
    };
    let downside = 1.0 - stop_fraction;

    Ok(TargetPrice {
        target_price: round2(current_price * (1.0 + upside)),
        stop_loss: round2(current_price * stop_fraction),
        upside_pct: round2(upside * 100.0),
        downside_pct: round2(downside * 100.0),
        risk_reward_ratio: upside / downside,
    })
}
