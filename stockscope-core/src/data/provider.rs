//! Data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over data sources (Yahoo Finance,
//! CSV import) so implementations can be swapped and mocked for tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{Bar, Metrics};

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("csv error: {0}")]
    Csv(String),

    #[error("data error: {0}")]
    Other(String),
}

/// History window for a price request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    /// The provider wire token (`1mo`, `1y`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
        }
    }

    /// Approximate trading days in the window (21 per month).
    pub fn trading_days(&self) -> usize {
        match self {
            Period::OneMonth => 21,
            Period::ThreeMonths => 63,
            Period::SixMonths => 126,
            Period::OneYear => 252,
            Period::TwoYears => 504,
            Period::FiveYears => 1260,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "5y" => Ok(Period::FiveYears),
            other => Err(format!(
                "unknown period '{other}' (expected one of: 1mo, 3mo, 6mo, 1y, 2y, 5y)"
            )),
        }
    }
}

/// Trait for market data sources.
///
/// `price_history` MUST return bars in ascending date order; an empty or
/// undersized series is a valid, non-error outcome. `fundamentals` may
/// return any subset of the enumerated metric keys.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Daily OHLCV bars for a symbol over the period, ascending by date.
    fn price_history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError>;

    /// Point-in-time fundamental metrics for a symbol.
    fn fundamentals(&self, symbol: &str) -> Result<Metrics, DataError>;
}
