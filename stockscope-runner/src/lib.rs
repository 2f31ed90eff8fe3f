//! StockScope Runner — analysis orchestration on top of the core engine.
//!
//! - `Analyzer`: wires a data provider, a sentiment source and the score
//!   config into full per-symbol reports, with rayon fan-out for batches
//! - Ranking/filter pipelines (top picks, value, gainers, weekly, buy-now)
//! - TOML configuration for weights, thresholds and cache TTL
//! - Report export (per-symbol JSON artifacts, ranking CSV)

pub mod analyzer;
pub mod config;
pub mod rank;
pub mod report;

pub use analyzer::{
    Analyzer, AnalyzeError, BatchOutcome, BuyAdvice, BuyVerdict, Forecasts, StockAnalysis,
};
pub use config::{AnalyzerConfig, ConfigError};
pub use rank::SortKey;
