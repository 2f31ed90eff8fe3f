//! Built-in symbol universes for batch analysis.

/// Large-cap names across sectors, the default scan universe.
pub const TRENDING: &[&str] = &[
    // Tech
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "AMD", "INTC", "CRM",
    // Finance
    "JPM", "BAC", "WFC", "GS", "MS", "V", "MA", "PYPL",
    // Healthcare
    "JNJ", "UNH", "PFE", "ABBV", "TMO", "MRK",
    // Consumer
    "WMT", "HD", "DIS", "NKE", "SBUX", "MCD", "COST",
    // Energy
    "XOM", "CVX", "COP",
    // Industrial
    "BA", "CAT", "GE",
];

/// Major technology names.
pub const TECH: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "GOOG", "AMZN", "META", "NVDA", "TSLA", "AMD", "INTC", "CRM", "ADBE",
    "NFLX", "ORCL", "CSCO", "AVGO", "QCOM", "TXN", "AMAT", "MU", "SNOW", "PLTR", "COIN",
];

/// The default scan universe as owned strings.
pub fn trending_symbols() -> Vec<String> {
    TRENDING.iter().map(|s| s.to_string()).collect()
}

/// The tech universe as owned strings.
pub fn tech_symbols() -> Vec<String> {
    TECH.iter().map(|s| s.to_string()).collect()
}
