//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar for a single symbol.
///
/// A price series is a `&[Bar]` in ascending date order with no duplicate
/// dates. The engine only ever reads a series; derived columns (returns,
/// moving averages) are scratch vectors, never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Basic OHLCV sanity check: high covers open/close, low is under both,
    /// and prices are positive finite numbers.
    pub fn is_sane(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Extract the close column from a series.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract the volume column from a series, as floats for rolling math.
pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 97.0; // below low
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_non_finite() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
