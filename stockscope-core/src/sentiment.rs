//! Market sentiment derived from price/volume action.
//!
//! The engine consumes sentiment as an opaque 0-100 number through the
//! `SentimentProvider` seam. The built-in `MarketSentiment` implementation
//! reads it off the series itself: recent return, volume expansion, and
//! moving-average alignment nudge a neutral 50 base up or down. External
//! news-based sources plug in behind the same trait.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{bar, Bar, NEUTRAL_SCORE};
use crate::indicators::{daily_returns, mean, round2, sample_stddev, sma};

const MIN_ROWS: usize = 20;

/// Source of a 0-100 sentiment score for a symbol.
///
/// Contract: never fails. A provider that cannot produce a reading returns
/// the neutral 50.0 rather than raising.
pub trait SentimentProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Sentiment in [0, 100]; 50 is neutral.
    fn score(&self, symbol: &str, bars: &[Bar]) -> f64;
}

/// Qualitative sentiment label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentRating {
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    VeryBearish,
}

impl SentimentRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            SentimentRating::VeryBullish
        } else if score >= 60.0 {
            SentimentRating::Bullish
        } else if score >= 40.0 {
            SentimentRating::Neutral
        } else if score >= 25.0 {
            SentimentRating::Bearish
        } else {
            SentimentRating::VeryBearish
        }
    }
}

impl fmt::Display for SentimentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentRating::VeryBullish => "Very Bullish",
            SentimentRating::Bullish => "Bullish",
            SentimentRating::Neutral => "Neutral",
            SentimentRating::Bearish => "Bearish",
            SentimentRating::VeryBearish => "Very Bearish",
        };
        write!(f, "{label}")
    }
}

/// Volume direction over the last week vs. the trailing month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Neutral,
}

/// Full sentiment reading with the component indicators behind the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub score: f64,
    pub rating: SentimentRating,
    pub volume_trend: VolumeTrend,
    pub volume_ratio: f64,
    pub recent_return_pct: f64,
    /// Annualized daily-return volatility, as a percentage.
    pub volatility_pct: f64,
    pub vs_sma20_pct: f64,
}

impl SentimentReading {
    fn neutral() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            rating: SentimentRating::Neutral,
            volume_trend: VolumeTrend::Neutral,
            volume_ratio: 1.0,
            recent_return_pct: 0.0,
            volatility_pct: 0.0,
            vs_sma20_pct: 0.0,
        }
    }
}

/// Sentiment read purely from price/volume action.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketSentiment;

impl MarketSentiment {
    pub fn new() -> Self {
        Self
    }

    /// Full reading for a series; neutral when under 20 rows or the series
    /// is degenerate.
    pub fn read(&self, bars: &[Bar]) -> SentimentReading {
        if bars.len() < MIN_ROWS {
            return SentimentReading::neutral();
        }
        match compute(bars) {
            Some(reading) => reading,
            None => SentimentReading::neutral(),
        }
    }
}

impl SentimentProvider for MarketSentiment {
    fn name(&self) -> &str {
        "market_sentiment"
    }

    fn score(&self, _symbol: &str, bars: &[Bar]) -> f64 {
        self.read(bars).score
    }
}

fn compute(bars: &[Bar]) -> Option<SentimentReading> {
    let closes = bar::closes(bars);
    let volumes = bar::volumes(bars);
    let n = closes.len();
    let price = *closes.last()?;

    // 20-day price momentum
    let base = closes[n - MIN_ROWS];
    if base == 0.0 || !base.is_finite() {
        return None;
    }
    let recent_return = (price - base) / base * 100.0;

    // Last week's volume vs. the trailing month before it
    let recent_volume = mean(&volumes[n - 5..]);
    let history_start = n.saturating_sub(30);
    let historical_volume = mean(&volumes[history_start..n - 5]);
    let volume_ratio = if historical_volume > 0.0 {
        recent_volume / historical_volume
    } else {
        1.0
    };

    // Annualized volatility
    let volatility = sample_stddev(&daily_returns(&closes)) * (252.0f64).sqrt() * 100.0;

    // Trend alignment
    let sma_20 = *sma(&closes, 20).last()?;
    let sma_50 = if n >= 50 {
        *sma(&closes, 50).last()?
    } else {
        sma_20
    };

    if !recent_return.is_finite()
        || !volume_ratio.is_finite()
        || !volatility.is_finite()
        || !sma_20.is_finite()
    {
        return None;
    }

    let mut sentiment = NEUTRAL_SCORE;

    // Price momentum component
    if recent_return > 10.0 {
        sentiment += 20.0;
    } else if recent_return > 5.0 {
        sentiment += 10.0;
    } else if recent_return > 0.0 {
        sentiment += 5.0;
    } else if recent_return < -10.0 {
        sentiment -= 20.0;
    } else if recent_return < -5.0 {
        sentiment -= 10.0;
    } else if recent_return < 0.0 {
        sentiment -= 5.0;
    }

    // Volume component
    if volume_ratio > 1.5 {
        sentiment += 10.0;
    } else if volume_ratio > 1.2 {
        sentiment += 5.0;
    } else if volume_ratio < 0.8 {
        sentiment -= 5.0;
    }

    // Trend component
    if price > sma_20 && sma_20 > sma_50 {
        sentiment += 10.0;
    } else if price < sma_20 && sma_20 < sma_50 {
        sentiment -= 10.0;
    }

    let score = sentiment.clamp(0.0, 100.0);

    let volume_trend = if volume_ratio > 1.2 {
        VolumeTrend::Increasing
    } else if volume_ratio < 0.8 {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Neutral
    };

    Some(SentimentReading {
        score: round2(score),
        rating: SentimentRating::from_score(score),
        volume_trend,
        volume_ratio: round2(volume_ratio),
        recent_return_pct: round2(recent_return),
        volatility_pct: round2(volatility),
        vs_sma20_pct: round2((price / sma_20 - 1.0) * 100.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_bars, make_bars_with_volume};

    #[test]
    fn thin_series_is_neutral() {
        let bars = make_bars(&vec![100.0; 19]);
        let reading = MarketSentiment::new().read(&bars);
        assert_eq!(reading.score, 50.0);
        assert_eq!(reading.rating, SentimentRating::Neutral);
    }

    #[test]
    fn provider_contract_returns_neutral_on_empty() {
        let sentiment = MarketSentiment::new();
        assert_eq!(sentiment.score("ACME", &[]), 50.0);
    }

    #[test]
    fn rally_with_volume_reads_bullish() {
        // +25% over 20 days on expanding volume with an aligned MA stack.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.012f64.powi(i)).collect();
        let mut volumes = vec![1000u64; 60];
        for v in volumes.iter_mut().skip(55) {
            *v = 2000;
        }
        let bars = make_bars_with_volume(&closes, &volumes);

        let reading = MarketSentiment::new().read(&bars);
        // momentum +20, volume +10, trend +10
        assert_eq!(reading.score, 90.0);
        assert_eq!(reading.rating, SentimentRating::VeryBullish);
        assert_eq!(reading.volume_trend, VolumeTrend::Increasing);
    }

    #[test]
    fn selloff_reads_bearish() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 * 0.99f64.powi(i)).collect();
        let bars = make_bars(&closes);

        let reading = MarketSentiment::new().read(&bars);
        assert!(reading.score < 50.0);
        assert!(reading.recent_return_pct < 0.0);
    }

    #[test]
    fn score_is_clamped() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.03f64.powi(i)).collect();
        let volumes: Vec<u64> = (0..60).map(|i| 500 + i * 100).collect();
        let bars = make_bars_with_volume(&closes, &volumes);

        let score = MarketSentiment::new().score("ACME", &bars);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn rating_boundaries() {
        assert_eq!(SentimentRating::from_score(75.0), SentimentRating::VeryBullish);
        assert_eq!(SentimentRating::from_score(74.99), SentimentRating::Bullish);
        assert_eq!(SentimentRating::from_score(40.0), SentimentRating::Neutral);
        assert_eq!(SentimentRating::from_score(39.99), SentimentRating::Bearish);
        assert_eq!(SentimentRating::from_score(24.99), SentimentRating::VeryBearish);
    }
}
