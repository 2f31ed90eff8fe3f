//! ADX — Average Directional Index (Wilder).
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Lookback: 2 * period (period for DI smoothing, then period for ADX).

use crate::domain::Bar;

/// ADX of `bars` over `period`.
pub fn adx(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let result = vec![f64::NAN; n];

    if n < 2 || period == 0 {
        return result;
    }

    // Step 1: +DM and -DM
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let high_diff = bars[i].high - bars[i - 1].high;
        let low_diff = bars[i - 1].low - bars[i].low;

        if bars[i].high.is_nan()
            || bars[i].low.is_nan()
            || bars[i - 1].high.is_nan()
            || bars[i - 1].low.is_nan()
        {
            continue;
        }

        plus_dm[i] = if high_diff > low_diff && high_diff > 0.0 {
            high_diff
        } else {
            0.0
        };
        minus_dm[i] = if low_diff > high_diff && low_diff > 0.0 {
            low_diff
        } else {
            0.0
        };
    }

    // Step 2: Wilder smooth +DM, -DM, and TR
    let tr = true_range(bars);
    let smooth_tr = wilder_smooth(&tr, period);
    let smooth_plus_dm = wilder_smooth(&plus_dm, period);
    let smooth_minus_dm = wilder_smooth(&minus_dm, period);

    // Steps 3-5: +DI, -DI, DX
    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        if smooth_tr[i].is_nan()
            || smooth_plus_dm[i].is_nan()
            || smooth_minus_dm[i].is_nan()
            || smooth_tr[i] == 0.0
        {
            continue;
        }

        let plus_di = 100.0 * smooth_plus_dm[i] / smooth_tr[i];
        let minus_di = 100.0 * smooth_minus_dm[i] / smooth_tr[i];
        let di_sum = plus_di + minus_di;

        dx[i] = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (plus_di - minus_di).abs() / di_sum
        };
    }

    // Step 6: Wilder smooth DX to get ADX
    wilder_smooth(&dx, period)
}

/// True Range series.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    let h = bars[0].high;
    let l = bars[0].low;
    if !h.is_nan() && !l.is_nan() {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            continue;
        }
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

/// Wilder smoothing (EMA with alpha = 1/period).
/// Seed: mean of the first `period` consecutive non-NaN values; NaN after
/// the seed taints the remainder of the series.
fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    // Find the first window of `period` consecutive non-NaN values
    let mut seed_start = None;
    let mut run = 0;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            run = 0;
        } else {
            run += 1;
            if run == period {
                seed_start = Some(i + 1 - period);
                break;
            }
        }
    }
    let Some(start) = seed_start else {
        return result;
    };

    let seed_end = start + period - 1;
    let seed: f64 = values[start..=seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;
    for i in (seed_end + 1)..n {
        if values[i].is_nan() {
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
    use chrono::NaiveDate;

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn adx_bounds() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
            (101.0, 106.0, 100.0, 105.0),
            (105.0, 110.0, 103.0, 108.0),
            (108.0, 112.0, 106.0, 110.0),
            (110.0, 111.0, 104.0, 105.0),
            (105.0, 109.0, 103.0, 107.0),
            (107.0, 113.0, 105.0, 112.0),
        ]);
        let result = adx(&bars, 3);

        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "ADX out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn adx_strong_trend_elevated() {
        let mut data = Vec::new();
        for i in 0..20 {
            let base = 100.0 + i as f64 * 5.0; // strong trend
            data.push((base - 1.0, base + 3.0, base - 3.0, base + 2.0));
        }
        let bars = make_ohlc_bars(&data);
        let result = adx(&bars, 5);

        let last = result.iter().rev().find(|v| !v.is_nan());
        assert!(last.is_some());
        if let Some(&v) = last {
            assert!(v > 10.0, "ADX should be elevated in strong trend, got {v}");
        }
    }

    #[test]
    fn adx_too_few_bars() {
        let bars = make_ohlc_bars(&[(100.0, 105.0, 95.0, 102.0)]);
        let result = adx(&bars, 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: TR picks up |high - prev_close|
        let bars = make_ohlc_bars(&[(100.0, 101.0, 99.0, 100.0), (110.0, 112.0, 109.0, 111.0)]);
        let tr = true_range(&bars);
        assert_eq!(tr[0], 2.0);
        assert_eq!(tr[1], 12.0); // 112 - 100
    }
}
