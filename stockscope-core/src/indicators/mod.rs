//! Indicator library.
//!
//! Pure functions over price/volume slices. Every function returns a vector
//! aligned with its input, `f64::NAN` during the warmup window and wherever
//! an input NaN taints the computation. The scorers and predictors read the
//! last value and treat a non-finite reading as a computation failure.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;

pub use adx::adx;
pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use macd::{macd, Macd};
pub use returns::{daily_returns, mean, sample_stddev, trailing_return};
pub use rsi::{rsi, rsi_from_delta};
pub use sma::sma;

/// Round to 2 decimals, the precision of every reported price/percentage.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    make_bars_with_volume(closes, &vec![1000; closes.len()])
}

/// Synthetic bars with explicit volumes, for volume-sensitive tests.
#[cfg(test)]
pub fn make_bars_with_volume(closes: &[f64], volumes: &[u64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    assert_eq!(closes.len(), volumes.len());
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
