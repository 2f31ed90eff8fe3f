//! MACD — Moving Average Convergence Divergence.
//!
//! MACD line: EMA(fast) - EMA(slow).
//! Signal line: EMA(signal_period) of the MACD line.
//! First valid MACD value at index slow - 1; first valid signal value at
//! index slow + signal_period - 2.

use super::ema::ema;

/// MACD line and signal line, aligned with the input series.
#[derive(Debug, Clone)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

/// MACD of `closes` with the given periods (conventionally 12, 26, 9).
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    assert!(fast < slow, "MACD fast period must be shorter than slow");
    let n = closes.len();

    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let mut line = vec![f64::NAN; n];
    for i in 0..n {
        if !fast_ema[i].is_nan() && !slow_ema[i].is_nan() {
            line[i] = fast_ema[i] - slow_ema[i];
        }
    }

    // The signal EMA seeds from the MACD line's valid suffix; feeding the
    // warmup NaNs into ema() would blank the whole series.
    let mut signal = vec![f64::NAN; n];
    if n >= slow {
        let start = slow - 1;
        let tail = ema(&line[start..], signal_period);
        for (offset, value) in tail.into_iter().enumerate() {
            signal[start + offset] = value;
        }
    }

    Macd { macd: line, signal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn macd_line_is_ema_difference() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let result = macd(&closes, 3, 6, 4);
        let fast = ema(&closes, 3);
        let slow = ema(&closes, 6);

        for i in 5..40 {
            assert_approx(result.macd[i], fast[i] - slow[i], DEFAULT_EPSILON);
        }
        for i in 0..5 {
            assert!(result.macd[i].is_nan());
        }
    }

    #[test]
    fn macd_signal_warmup() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64).sin()).collect();
        let result = macd(&closes, 3, 6, 4);

        // First valid signal at index slow + signal_period - 2 = 8
        for i in 0..8 {
            assert!(result.signal[i].is_nan(), "expected NaN signal at {i}");
        }
        assert!(!result.signal[8].is_nan());
    }

    #[test]
    fn macd_uptrend_line_above_signal() {
        // Accelerating uptrend: fast EMA pulls ahead of slow, MACD line
        // rises, so the line leads its own smoothed signal.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let result = macd(&closes, 12, 26, 9);

        let last_macd = *result.macd.last().unwrap();
        let last_signal = *result.signal.last().unwrap();
        assert!(last_macd > last_signal);
    }

    #[test]
    fn macd_too_few_values() {
        let closes = [100.0, 101.0, 102.0];
        let result = macd(&closes, 12, 26, 9);
        assert!(result.macd.iter().all(|v| v.is_nan()));
        assert!(result.signal.iter().all(|v| v.is_nan()));
    }
}
