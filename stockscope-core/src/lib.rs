//! StockScope Core — scoring and prediction engine for individual equities.
//!
//! This crate contains the heart of the analysis pipeline:
//! - Domain types (bars, fundamental metrics, score/prediction value objects)
//! - Indicator library (RSI, MACD, moving averages, Bollinger Bands, ADX)
//! - Component scorers (technical, fundamental, momentum) with neutral
//!   fallbacks for thin or degenerate data
//! - Score combiner (weighted blend into an overall score, rating, stars)
//! - Predictor (short/medium/long-term forecasts, entry-point classifier,
//!   target-price/stop-loss derivation)
//! - Market sentiment derived from price/volume action
//! - Data provider layer (Yahoo Finance, CSV import, TTL memo cache)
//!
//! The engine is single-threaded and purely functional over immutable
//! inputs; orchestration and batch fan-out live in `stockscope-runner`.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod predict;
pub mod score;
pub mod sentiment;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core domain types are Send + Sync.
    ///
    /// The runner fans analyses out across a rayon pool; if any type fails
    /// this check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Metrics>();
        require_sync::<domain::Metrics>();
        require_send::<domain::ScoreComponent>();
        require_sync::<domain::ScoreComponent>();
        require_send::<domain::Shortfall>();
        require_sync::<domain::Shortfall>();

        require_send::<score::OverallScore>();
        require_sync::<score::OverallScore>();
        require_send::<score::ScoreConfig>();
        require_sync::<score::ScoreConfig>();

        require_send::<predict::Prediction>();
        require_sync::<predict::Prediction>();
        require_send::<predict::LongTermPrediction>();
        require_sync::<predict::LongTermPrediction>();
        require_send::<predict::EntrySignal>();
        require_sync::<predict::EntrySignal>();
        require_send::<predict::TargetPrice>();
        require_sync::<predict::TargetPrice>();

        require_send::<sentiment::SentimentReading>();
        require_sync::<sentiment::SentimentReading>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::Period>();
        require_sync::<data::Period>();
    }
}
