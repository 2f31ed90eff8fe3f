//! Yahoo Finance data provider.
//!
//! Daily OHLCV bars from the v8 chart API (range-based request) and
//! fundamental metrics from the v10 quoteSummary API. Handles rate
//! limiting, retries with exponential backoff, and response parsing.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. The CSV import path is the offline fallback.

use serde::Deserialize;
use std::time::Duration;

use super::provider::{DataError, MarketDataProvider, Period};
use crate::domain::{Bar, Metric, Metrics};

// ── v8 chart API response ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

// ── v10 quoteSummary response ───────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryModules>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryModules {
    #[serde(rename = "summaryDetail", default)]
    summary_detail: SummaryDetail,
    #[serde(rename = "financialData", default)]
    financial_data: FinancialData,
    #[serde(rename = "defaultKeyStatistics", default)]
    key_statistics: KeyStatistics,
}

/// Yahoo wraps every number as `{"raw": 1.23, "fmt": "1.23"}`.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

impl RawValue {
    fn value(&self) -> Option<f64> {
        self.raw
    }
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "trailingPE", default)]
    trailing_pe: RawValue,
    #[serde(rename = "forwardPE", default)]
    forward_pe: RawValue,
    #[serde(rename = "priceToSalesTrailing12Months", default)]
    price_to_sales: RawValue,
    #[serde(rename = "marketCap", default)]
    market_cap: RawValue,
    #[serde(default)]
    beta: RawValue,
    #[serde(rename = "dividendYield", default)]
    dividend_yield: RawValue,
    #[serde(rename = "fiftyTwoWeekHigh", default)]
    fifty_two_week_high: RawValue,
    #[serde(rename = "fiftyTwoWeekLow", default)]
    fifty_two_week_low: RawValue,
    #[serde(rename = "averageVolume", default)]
    average_volume: RawValue,
}

#[derive(Debug, Default, Deserialize)]
struct FinancialData {
    #[serde(rename = "debtToEquity", default)]
    debt_to_equity: RawValue,
    #[serde(rename = "currentRatio", default)]
    current_ratio: RawValue,
    #[serde(rename = "returnOnEquity", default)]
    return_on_equity: RawValue,
    #[serde(rename = "returnOnAssets", default)]
    return_on_assets: RawValue,
    #[serde(rename = "profitMargins", default)]
    profit_margins: RawValue,
    #[serde(rename = "operatingMargins", default)]
    operating_margins: RawValue,
    #[serde(rename = "revenueGrowth", default)]
    revenue_growth: RawValue,
    #[serde(rename = "earningsGrowth", default)]
    earnings_growth: RawValue,
}

#[derive(Debug, Default, Deserialize)]
struct KeyStatistics {
    #[serde(rename = "pegRatio", default)]
    peg_ratio: RawValue,
    #[serde(rename = "priceToBook", default)]
    price_to_book: RawValue,
    #[serde(rename = "enterpriseValue", default)]
    enterprise_value: RawValue,
}

// ── Provider ────────────────────────────────────────────────────────

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    fn chart_url(symbol: &str, period: Period) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range={}&interval=1d",
            period.as_str()
        )
    }

    fn summary_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}\
             ?modules=summaryDetail,financialData,defaultKeyStatistics"
        )
    }

    /// Parse the chart API response into bars.
    fn parse_chart(symbol: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Skip bars where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            bars.push(Bar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
            });
        }

        Ok(bars)
    }

    fn collect_metrics(modules: SummaryModules) -> Metrics {
        let mut metrics = Metrics::new();
        let detail = &modules.summary_detail;
        let financial = &modules.financial_data;
        let stats = &modules.key_statistics;

        metrics.insert_opt(Metric::PeRatio, detail.trailing_pe.value());
        metrics.insert_opt(Metric::ForwardPe, detail.forward_pe.value());
        metrics.insert_opt(Metric::PegRatio, stats.peg_ratio.value());
        metrics.insert_opt(Metric::PriceToBook, stats.price_to_book.value());
        metrics.insert_opt(Metric::PriceToSales, detail.price_to_sales.value());
        metrics.insert_opt(Metric::DebtToEquity, financial.debt_to_equity.value());
        metrics.insert_opt(Metric::CurrentRatio, financial.current_ratio.value());
        metrics.insert_opt(Metric::Roe, financial.return_on_equity.value());
        metrics.insert_opt(Metric::Roa, financial.return_on_assets.value());
        metrics.insert_opt(Metric::ProfitMargin, financial.profit_margins.value());
        metrics.insert_opt(Metric::OperatingMargin, financial.operating_margins.value());
        metrics.insert_opt(Metric::MarketCap, detail.market_cap.value());
        metrics.insert_opt(Metric::EnterpriseValue, stats.enterprise_value.value());
        metrics.insert_opt(Metric::Beta, detail.beta.value());
        metrics.insert_opt(Metric::DividendYield, detail.dividend_yield.value());
        metrics.insert_opt(Metric::FiftyTwoWeekHigh, detail.fifty_two_week_high.value());
        metrics.insert_opt(Metric::FiftyTwoWeekLow, detail.fifty_two_week_low.value());
        metrics.insert_opt(Metric::AvgVolume, detail.average_volume.value());
        metrics.insert_opt(Metric::RevenueGrowth, financial.revenue_growth.value());
        metrics.insert_opt(Metric::EarningsGrowth, financial.earnings_growth.value());

        metrics
    }

    /// Execute a GET with retry and backoff, parsing the body with `parse`.
    fn fetch_with_retry<T>(
        &self,
        symbol: &str,
        url: &str,
        parse: impl Fn(reqwest::blocking::Response) -> Result<T, DataError>,
    ) -> Result<T, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(DataError::SymbolNotFound {
                            symbol: symbol.to_string(),
                        });
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    return parse(resp);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn price_history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError> {
        let url = Self::chart_url(symbol, period);
        self.fetch_with_retry(symbol, &url, |resp| {
            let chart: ChartResponse = resp.json().map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "failed to parse chart response for {symbol}: {e}"
                ))
            })?;
            Self::parse_chart(symbol, chart)
        })
    }

    fn fundamentals(&self, symbol: &str) -> Result<Metrics, DataError> {
        let url = Self::summary_url(symbol);
        self.fetch_with_retry(symbol, &url, |resp| {
            let summary: SummaryResponse = resp.json().map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "failed to parse summary response for {symbol}: {e}"
                ))
            })?;

            let result = summary.quote_summary.result.ok_or_else(|| {
                if let Some(err) = summary.quote_summary.error {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                } else {
                    DataError::ResponseFormatChanged("empty result with no error".into())
                }
            })?;

            let modules = result.into_iter().next().unwrap_or_default();
            Ok(Self::collect_metrics(modules))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chart_skips_all_null_rows() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400],
                    "indicators": {
                        "quote": [{
                            "open":   [100.0, null, 102.0],
                            "high":   [105.0, null, 106.0],
                            "low":    [ 99.0, null, 101.0],
                            "close":  [103.0, null, 104.0],
                            "volume": [50000, null, 52000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(body).unwrap();
        let bars = YahooProvider::parse_chart("ACME", resp).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 103.0);
        assert_eq!(bars[1].volume, 52000);
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn parse_chart_not_found_maps_to_symbol_error() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(body).unwrap();
        let err = YahooProvider::parse_chart("NOPE", resp).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn collect_metrics_unwraps_raw_values() {
        let body = r#"{
            "summaryDetail": {
                "trailingPE": {"raw": 24.5, "fmt": "24.50"},
                "beta": {"raw": 1.1},
                "dividendYield": {"raw": 0.006}
            },
            "financialData": {
                "returnOnEquity": {"raw": 0.31},
                "revenueGrowth": {}
            },
            "defaultKeyStatistics": {
                "pegRatio": {"raw": 1.8}
            }
        }"#;
        let modules: SummaryModules = serde_json::from_str(body).unwrap();
        let metrics = YahooProvider::collect_metrics(modules);

        assert_eq!(metrics.get(Metric::PeRatio), Some(24.5));
        assert_eq!(metrics.get(Metric::Beta), Some(1.1));
        assert_eq!(metrics.get(Metric::Roe), Some(0.31));
        assert_eq!(metrics.get(Metric::PegRatio), Some(1.8));
        // Present-but-empty wrapper stays unknown
        assert_eq!(metrics.get(Metric::RevenueGrowth), None);
    }

    #[test]
    fn chart_url_uses_range_token() {
        let url = YahooProvider::chart_url("SPY", Period::OneYear);
        assert!(url.contains("/v8/finance/chart/SPY"));
        assert!(url.contains("range=1y"));
        assert!(url.contains("interval=1d"));
    }
}
