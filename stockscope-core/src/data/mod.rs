//! Data provider layer.
//!
//! The engine treats market data as an external collaborator: providers
//! return ordered daily bars and a fundamentals mapping, may fail, and may
//! return empty or partial data. The per-component minimum-row fallbacks in
//! the scorers and predictors absorb whatever arrives.

pub mod csv;
pub mod memo;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use self::csv::CsvProvider;
pub use memo::MemoCache;
pub use provider::{DataError, MarketDataProvider, Period};
pub use universe::{tech_symbols, trending_symbols};
pub use yahoo::YahooProvider;
