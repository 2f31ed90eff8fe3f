//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1]
//! Seed: EMA[period-1] = SMA of first `period` values.
//! Alpha = 2 / (period + 1).

/// EMA of `values` over `period`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of first `period` values
    let mut sum = 0.0;
    for &v in values.iter().take(period) {
        if v.is_nan() {
            return result; // NaN in seed window → all NaN
        }
        sum += v;
    }
    let seed = sum / period as f64;
    result[period - 1] = seed;

    // Recursive EMA; a NaN taints everything after it
    let mut prev = seed;
    for i in period..n {
        if values[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let next = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = next;
        prev = next;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_input() {
        let values = [100.0, 200.0, 300.0];
        let result = ema(&values, 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 2/(3+1) = 0.5
        // Seed at index 2: SMA(10,11,12) = 11.0
        // EMA[3] = 0.5*13 + 0.5*11.0 = 12.0
        // EMA[4] = 0.5*14 + 0.5*12.0 = 13.0
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let result = ema(&values, 3);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_nan_in_seed_produces_all_nan() {
        let values = [10.0, f64::NAN, 12.0, 13.0, 14.0];
        let result = ema(&values, 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_nan_after_seed_propagates() {
        let values = [10.0, 11.0, 12.0, f64::NAN, 14.0];
        let result = ema(&values, 3);
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
    }
}
