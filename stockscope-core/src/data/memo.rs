//! TTL memo cache for provider calls.
//!
//! Wraps any `MarketDataProvider` and memoizes successful results for a
//! fixed time-to-live (default 5 minutes). Failures are never cached, so a
//! transient provider error retries on the next call. The cache sits above
//! the provider trait; providers don't know about it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::provider::{DataError, MarketDataProvider, Period};
use crate::domain::{Bar, Metrics};

/// Default TTL for memoized provider results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

/// TTL-memoizing wrapper around a provider.
pub struct MemoCache<P> {
    inner: P,
    ttl: Duration,
    prices: Mutex<HashMap<(String, Period), Entry<Vec<Bar>>>>,
    fundamentals: Mutex<HashMap<String, Entry<Metrics>>>,
}

impl<P: MarketDataProvider> MemoCache<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            prices: Mutex::new(HashMap::new()),
            fundamentals: Mutex::new(HashMap::new()),
        }
    }

    /// Drop all memoized entries.
    pub fn clear(&self) {
        if let Ok(mut prices) = self.prices.lock() {
            prices.clear();
        }
        if let Ok(mut fundamentals) = self.fundamentals.lock() {
            fundamentals.clear();
        }
    }
}

impl<P: MarketDataProvider> MarketDataProvider for MemoCache<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn price_history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError> {
        let key = (symbol.to_string(), period);

        if let Ok(cache) = self.prices.lock() {
            if let Some(entry) = cache.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(entry.value.clone());
                }
            }
        }

        let bars = self.inner.price_history(symbol, period)?;

        if let Ok(mut cache) = self.prices.lock() {
            cache.insert(
                key,
                Entry {
                    value: bars.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }

        Ok(bars)
    }

    fn fundamentals(&self, symbol: &str) -> Result<Metrics, DataError> {
        if let Ok(cache) = self.fundamentals.lock() {
            if let Some(entry) = cache.get(symbol) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(entry.value.clone());
                }
            }
        }

        let metrics = self.inner.fundamentals(symbol)?;

        if let Ok(mut cache) = self.fundamentals.lock() {
            cache.insert(
                symbol.to_string(),
                Entry {
                    value: metrics.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }

        Ok(metrics)
    }
}
