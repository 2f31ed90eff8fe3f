//! CSV data provider for offline use.
//!
//! Reads `{dir}/{SYMBOL}.csv` with a `date,open,high,low,close,volume`
//! header, sorts ascending by date, and trims to the requested period's
//! trading-day budget. Fundamentals come from an optional
//! `{dir}/{SYMBOL}-metrics.json` sidecar keyed by the metric wire names.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::provider::{DataError, MarketDataProvider, Period};
use crate::domain::{Bar, Metrics};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Offline provider backed by a directory of CSV files.
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn metrics_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}-metrics.json"))
    }

    fn read_bars(&self, path: &Path, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            if e.is_io_error() {
                DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                }
            } else {
                DataError::Csv(e.to_string())
            }
        })?;

        let mut bars = Vec::new();
        for record in reader.deserialize() {
            let row: CsvRow = record.map_err(|e| DataError::Csv(e.to_string()))?;
            bars.push(Bar {
                date: row.date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Ok(bars)
    }
}

impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn price_history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError> {
        let mut bars = self.read_bars(&self.csv_path(symbol), symbol)?;

        // Keep only the trailing window the period asks for.
        let budget = period.trading_days();
        if bars.len() > budget {
            bars.drain(..bars.len() - budget);
        }
        Ok(bars)
    }

    fn fundamentals(&self, symbol: &str) -> Result<Metrics, DataError> {
        let path = self.metrics_path(symbol);
        if !path.exists() {
            // No sidecar is a valid outcome: analysis proceeds on the
            // fundamental scorer's neutral fallback.
            return Ok(Metrics::new());
        }

        let content =
            fs::read_to_string(&path).map_err(|e| DataError::Other(format!("metrics read: {e}")))?;
        serde_json::from_str(&content)
            .map_err(|e| DataError::Other(format!("metrics parse for {symbol}: {e}")))
    }
}
