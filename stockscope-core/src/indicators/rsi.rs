//! Relative Strength Index (RSI), in two flavors.
//!
//! `rsi` uses Wilder smoothing of average gains and average losses.
//! `rsi_from_delta` uses plain rolling means of gains and losses, the
//! variant the entry-point classifier computes directly from price deltas.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; both zero → 50.

/// Wilder-smoothed RSI of `closes` over `period`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    let changes = price_changes(closes);

    // Seed: average gain and average loss over first `period` changes
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[1..=period] {
        if ch.is_nan() {
            return result;
        }
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = rs_to_rsi(avg_gain, avg_loss);

    // Wilder smoothing for subsequent values
    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        if changes[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }

        let gain = if changes[i] > 0.0 { changes[i] } else { 0.0 };
        let loss = if changes[i] < 0.0 { -changes[i] } else { 0.0 };

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = rs_to_rsi(avg_gain, avg_loss);
    }

    result
}

/// Rolling-mean RSI: average positive delta over average negative delta
/// within a plain `period`-wide window, no smoothing.
pub fn rsi_from_delta(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    let changes = price_changes(closes);

    for i in period..n {
        let window = &changes[(i + 1 - period)..=i];
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        let mut has_nan = false;
        for &ch in window {
            if ch.is_nan() {
                has_nan = true;
                break;
            }
            if ch > 0.0 {
                gain_sum += ch;
            } else {
                loss_sum -= ch;
            }
        }
        if has_nan {
            continue;
        }
        result[i] = rs_to_rsi(gain_sum / period as f64, loss_sum / period as f64);
    }

    result
}

fn price_changes(closes: &[f64]) -> Vec<f64> {
    let n = closes.len();
    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        let curr = closes[i];
        let prev = closes[i - 1];
        if curr.is_nan() || prev.is_nan() {
            changes[i] = f64::NAN;
        } else {
            changes[i] = curr - prev;
        }
    }
    changes
}

fn rs_to_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
