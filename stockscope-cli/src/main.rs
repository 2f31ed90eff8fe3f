//! StockScope CLI — equity scoring, forecasts and scan commands.
//!
//! Commands:
//! - `analyze SYMBOL` — full scoring/forecast report for one symbol
//! - `should-buy SYMBOL` — buy-now verdict with reasoning
//! - `picks N` — top picks from the scan universe by overall score
//! - `gainers N` — predicted top gainers for tomorrow
//! - `value N` — best value picks (strong fundamentals)
//! - `weekly N` — picks for the week
//! - `long-term N` — quality long-term holds
//! - `buy-now N` — stocks with a strong entry signal right now

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use stockscope_core::data::{
    tech_symbols, trending_symbols, CsvProvider, MarketDataProvider, MemoCache, Period,
    YahooProvider,
};
use stockscope_core::domain::Assessment;
use stockscope_core::sentiment::MarketSentiment;
use stockscope_runner::{rank, report, Analyzer, AnalyzerConfig, StockAnalysis};

#[derive(Parser)]
#[command(
    name = "stockscope",
    about = "StockScope CLI — equity scoring and prediction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (weights, thresholds, cache TTL).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Offline mode: read bars from CSV files instead of Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    /// Directory with {SYMBOL}.csv files for offline mode.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Print JSON instead of formatted tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full scoring/forecast report for one symbol.
    Analyze {
        symbol: String,

        /// History window (1mo, 3mo, 6mo, 1y, 2y, 5y).
        #[arg(long, default_value = "1y")]
        period: Period,

        /// Also save the report as JSON into this directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Should I buy this stock right now?
    ShouldBuy { symbol: String },
    /// Top N picks from the scan universe by overall score.
    Picks {
        #[arg(default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        scan: ScanOpts,
    },
    /// Predicted top N gainers for tomorrow.
    Gainers {
        #[arg(default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        scan: ScanOpts,
    },
    /// Best N value picks (strong fundamentals).
    Value {
        #[arg(default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        scan: ScanOpts,
    },
    /// Top N picks for the week.
    Weekly {
        #[arg(default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        scan: ScanOpts,
    },
    /// Quality long-term holds.
    LongTerm {
        #[arg(default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        scan: ScanOpts,
    },
    /// Stocks with a strong entry signal right now.
    BuyNow {
        #[arg(default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        scan: ScanOpts,
    },
}

#[derive(Args)]
struct ScanOpts {
    /// Universe to scan: trending or tech.
    #[arg(long, default_value = "trending")]
    universe: String,

    /// Explicit symbols (overrides --universe).
    #[arg(long, num_args = 1..)]
    symbols: Vec<String>,

    /// History window for the scan.
    #[arg(long, default_value = "1y")]
    period: Period,

    /// Write the ranking table as CSV to this path.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl ScanOpts {
    fn symbols(&self) -> Result<Vec<String>> {
        if !self.symbols.is_empty() {
            return Ok(self.symbols.clone());
        }
        match self.universe.as_str() {
            "trending" => Ok(trending_symbols()),
            "tech" => Ok(tech_symbols()),
            other => bail!("unknown universe '{other}' (expected: trending, tech)"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = build_analyzer(&cli, &config)?;

    match cli.command {
        Commands::Analyze {
            ref symbol,
            period,
            ref output,
        } => run_analyze(&cli, &analyzer, symbol, period, output.as_deref()),
        Commands::ShouldBuy { ref symbol } => run_should_buy(&cli, &analyzer, symbol),
        Commands::Picks { count, ref scan } => run_scan(
            &cli,
            &analyzer,
            scan,
            count,
            "Top Stock Picks",
            rank::top_picks,
        ),
        Commands::Gainers { count, ref scan } => run_scan(
            &cli,
            &analyzer,
            scan,
            count,
            "Predicted Top Gainers for Tomorrow",
            rank::top_gainers,
        ),
        Commands::Value { count, ref scan } => run_scan(
            &cli,
            &analyzer,
            scan,
            count,
            "Best Value Picks",
            rank::best_value,
        ),
        Commands::Weekly { count, ref scan } => run_scan(
            &cli,
            &analyzer,
            scan,
            count,
            "Top Picks for This Week",
            rank::weekly_picks,
        ),
        Commands::LongTerm { count, ref scan } => run_scan(
            &cli,
            &analyzer,
            scan,
            count,
            "Long-Term Investment Picks",
            rank::long_term_picks,
        ),
        Commands::BuyNow { count, ref scan } => run_scan(
            &cli,
            &analyzer,
            scan,
            count,
            "Stocks to Buy Right Now",
            rank::buy_now,
        ),
    }
}

fn build_analyzer(cli: &Cli, config: &AnalyzerConfig) -> Result<Analyzer> {
    let provider: Box<dyn MarketDataProvider> = if cli.offline {
        Box::new(CsvProvider::new(&cli.data_dir))
    } else {
        Box::new(MemoCache::with_ttl(
            YahooProvider::new()?,
            Duration::from_secs(config.cache_ttl_secs),
        ))
    };

    Ok(Analyzer::new(
        provider,
        Box::new(MarketSentiment::new()),
        config.score_config(),
    ))
}

fn run_analyze(
    cli: &Cli,
    analyzer: &Analyzer,
    symbol: &str,
    period: Period,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let symbol = symbol.to_uppercase();
    let analysis = analyzer.analyze(&symbol, period)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_header(&format!("Detailed Analysis: {symbol}"));
        print_summary(&analysis);
    }

    if let Some(dir) = output {
        let path = report::save_analysis(&analysis, dir)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn run_should_buy(cli: &Cli, analyzer: &Analyzer, symbol: &str) -> Result<()> {
    let symbol = symbol.to_uppercase();
    let advice = analyzer.should_buy_now(&symbol)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&advice)?);
        return Ok(());
    }

    print_header(&format!("Should I Buy {symbol}?"));
    println!();
    println!("  RECOMMENDATION: {}", advice.verdict);
    println!();
    println!("  {}", advice.reason);
    println!();
    println!("  Current Price: ${:.2}", advice.current_price);
    println!("  Target Price:  ${:.2}", advice.target_price);
    println!("  Stop Loss:     ${:.2}", advice.stop_loss);
    println!("  Overall Score: {:.1}/100", advice.score);
    println!();

    Ok(())
}

fn run_scan(
    cli: &Cli,
    analyzer: &Analyzer,
    scan: &ScanOpts,
    count: usize,
    title: &str,
    pick: fn(Vec<StockAnalysis>, usize) -> Vec<StockAnalysis>,
) -> Result<()> {
    let symbols = scan.symbols()?;
    eprintln!("Analyzing {} symbols...", symbols.len());

    let outcome = analyzer.analyze_many(&symbols, scan.period);
    for (symbol, error) in &outcome.failures {
        eprintln!("  FAIL: {symbol}: {error}");
    }

    let picks = pick(outcome.analyses, count);

    if let Some(path) = &scan.csv {
        report::write_ranking_csv(&picks, path)?;
        eprintln!("Ranking saved to: {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&picks)?);
    } else {
        print_header(title);
        print_table(&picks);
    }

    Ok(())
}

// ── Output formatting ───────────────────────────────────────────────

fn print_header(text: &str) {
    println!();
    println!("{}", "=".repeat(80));
    println!("  {text}");
    println!("{}", "=".repeat(80));
}

fn stars(count: u8) -> String {
    let filled = "\u{2605}".repeat(count as usize);
    let empty = "\u{2606}".repeat(5usize.saturating_sub(count as usize));
    format!("{filled}{empty}")
}

fn print_summary(analysis: &StockAnalysis) {
    let overall = &analysis.overall;

    println!();
    println!(
        "  OVERALL SCORE: {:.1}/100  {}",
        overall.value,
        stars(overall.stars)
    );
    println!("  RATING: {}", overall.rating);

    println!();
    println!("  Current Price: ${:.2}", analysis.current_price);
    println!("  Target Price:  ${:.2}", analysis.targets.target_price);
    println!("  Stop Loss:     ${:.2}", analysis.targets.stop_loss);
    println!("  Upside:        {:.1}%", analysis.targets.upside_pct);

    println!();
    println!("  Component Scores:");
    println!("    Technical:    {:.1}/100", overall.components.technical);
    println!("    Fundamental:  {:.1}/100", overall.components.fundamental);
    println!("    Sentiment:    {:.1}/100", overall.components.sentiment);
    println!("    Momentum:     {:.1}/100", overall.components.momentum);

    println!();
    println!("  Predictions:");
    match &analysis.forecasts.tomorrow {
        Assessment::Ready(p) => println!(
            "    Tomorrow:  {} {:.2}% (${:.2}) [Confidence: {:.0}%]",
            p.direction,
            p.predicted_change_pct.abs(),
            p.predicted_price,
            p.confidence
        ),
        Assessment::Unavailable(s) => println!("    Tomorrow:  {s}"),
    }
    match &analysis.forecasts.next_week {
        Assessment::Ready(p) => println!(
            "    Next Week: {} {:.2}% (${:.2})",
            p.direction,
            p.predicted_change_pct.abs(),
            p.predicted_price
        ),
        Assessment::Unavailable(s) => println!("    Next Week: {s}"),
    }
    match &analysis.forecasts.long_term {
        Assessment::Ready(p) => println!(
            "    12 Months: {} {:.2}% (${:.2})",
            p.outlook,
            p.predicted_change_pct.abs(),
            p.predicted_price
        ),
        Assessment::Unavailable(s) => println!("    12 Months: {s}"),
    }

    println!();
    match &analysis.entry {
        Assessment::Ready(signal) => {
            println!("  Entry Signal: {}", signal.label);
            println!(
                "  RSI: {:.1} | 52W Position: {:.1}%",
                signal.rsi, signal.range_position_pct
            );
            for tag in &signal.supporting_signals {
                println!("    - {tag}");
            }
        }
        Assessment::Unavailable(s) => println!("  Entry Signal: {s}"),
    }

    println!();
    println!(
        "  Sentiment: {} ({:.1}/100)",
        analysis.sentiment_rating, analysis.sentiment_score
    );

    if !analysis.metrics.is_empty() {
        println!();
        println!("  Key Metrics:");
        for (metric, value) in analysis.metrics.iter() {
            println!("    {:<18} {value:.2}", metric.key());
        }
    }
    println!();
}

fn print_table(analyses: &[StockAnalysis]) {
    if analyses.is_empty() {
        println!();
        println!("  No symbols matched the filter.");
        return;
    }

    println!();
    println!(
        "{:<8} {:>10} {:>7} {:<12} {:<7} {:<12} {:<14} {:<22}",
        "Symbol", "Price", "Score", "Rating", "Stars", "Tomorrow", "Sentiment", "Entry Signal"
    );
    println!("{}", "-".repeat(96));

    for analysis in analyses {
        let tomorrow = match &analysis.forecasts.tomorrow {
            Assessment::Ready(p) => {
                format!("{} {:.1}%", p.direction, p.predicted_change_pct.abs())
            }
            Assessment::Unavailable(s) => s.to_string(),
        };
        let entry = match &analysis.entry {
            Assessment::Ready(signal) => signal.label.to_string(),
            Assessment::Unavailable(s) => s.to_string(),
        };

        println!(
            "{:<8} {:>10} {:>7.1} {:<12} {:<7} {:<12} {:<14} {:<22}",
            analysis.symbol,
            format!("${:.2}", analysis.current_price),
            analysis.overall.value,
            analysis.overall.rating.to_string(),
            "\u{2605}".repeat(analysis.overall.stars as usize),
            tomorrow,
            analysis.sentiment_rating.to_string(),
            entry,
        );
    }
    println!();
}
