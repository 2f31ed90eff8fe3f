//! Fundamental metrics — a point-in-time mapping of named ratios.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed set of fundamental metric keys a data provider may supply.
///
/// Serialized names match the provider wire keys (`pe_ratio`,
/// `52_week_high`, ...). An absent key means "unknown", never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PeRatio,
    ForwardPe,
    PegRatio,
    PriceToBook,
    PriceToSales,
    DebtToEquity,
    CurrentRatio,
    Roe,
    Roa,
    ProfitMargin,
    OperatingMargin,
    MarketCap,
    EnterpriseValue,
    Beta,
    DividendYield,
    #[serde(rename = "52_week_high")]
    FiftyTwoWeekHigh,
    #[serde(rename = "52_week_low")]
    FiftyTwoWeekLow,
    AvgVolume,
    RevenueGrowth,
    EarningsGrowth,
}

impl Metric {
    /// The serialized key name, for detail maps and reports.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::PeRatio => "pe_ratio",
            Metric::ForwardPe => "forward_pe",
            Metric::PegRatio => "peg_ratio",
            Metric::PriceToBook => "price_to_book",
            Metric::PriceToSales => "price_to_sales",
            Metric::DebtToEquity => "debt_to_equity",
            Metric::CurrentRatio => "current_ratio",
            Metric::Roe => "roe",
            Metric::Roa => "roa",
            Metric::ProfitMargin => "profit_margin",
            Metric::OperatingMargin => "operating_margin",
            Metric::MarketCap => "market_cap",
            Metric::EnterpriseValue => "enterprise_value",
            Metric::Beta => "beta",
            Metric::DividendYield => "dividend_yield",
            Metric::FiftyTwoWeekHigh => "52_week_high",
            Metric::FiftyTwoWeekLow => "52_week_low",
            Metric::AvgVolume => "avg_volume",
            Metric::RevenueGrowth => "revenue_growth",
            Metric::EarningsGrowth => "earnings_growth",
        }
    }
}

/// Point-in-time fundamental metrics for one symbol.
///
/// Any subset of the enumerated keys may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics(BTreeMap<Metric, f64>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    /// Insert a metric value. Non-finite values are treated as unknown and
    /// discarded.
    pub fn insert(&mut self, metric: Metric, value: f64) {
        if value.is_finite() {
            self.0.insert(metric, value);
        }
    }

    /// Insert only when the provider actually had a value.
    pub fn insert_opt(&mut self, metric: Metric, value: Option<f64>) {
        if let Some(v) = value {
            self.insert(metric, v);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(Metric, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        let mut metrics = Metrics::new();
        for (k, v) in iter {
            metrics.insert(k, v);
        }
        metrics
    }
}
