//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Middle: SMA(close, period); upper/lower: middle ± mult * stddev.
//! Uses population stddev (divide by N). First valid value at period - 1.

/// The three bands, aligned with the input series.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger Bands of `closes` over `period` with `mult` standard deviations.
pub fn bollinger(closes: &[f64], period: usize, mult: f64) -> BollingerBands {
    let n = closes.len();
    let mut bands = BollingerBands {
        upper: vec![f64::NAN; n],
        middle: vec![f64::NAN; n],
        lower: vec![f64::NAN; n],
    };

    if n < period || period == 0 {
        return bands;
    }

    for i in (period - 1)..n {
        let window = &closes[(i + 1 - period)..=i];

        let mut has_nan = false;
        let mut sum = 0.0;
        for &v in window {
            if v.is_nan() {
                has_nan = true;
                break;
            }
            sum += v;
        }
        if has_nan {
            continue;
        }

        let mean = sum / period as f64;
        let variance: f64 = window
            .iter()
            .map(|&v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        bands.middle[i] = mean;
        bands.upper[i] = mean + mult * stddev;
        bands.lower[i] = mean - mult * stddev;
    }

    bands
}
