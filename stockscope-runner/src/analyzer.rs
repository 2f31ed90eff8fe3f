//! Per-symbol analysis orchestration.
//!
//! One `analyze` call runs the full pipeline in dependency order: fetch,
//! the three scorers plus sentiment, the combiner, then the predictor
//! stages that consume the combined score. Batches fan out across a rayon
//! pool — each symbol's analysis is independent and holds no shared
//! mutable state.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use stockscope_core::data::{DataError, MarketDataProvider, Period};
use stockscope_core::domain::{Assessment, Metrics, ScoreComponent};
use stockscope_core::predict::{
    entry_point, predict_long_term, predict_medium_term, predict_short_term, target_price,
    EntryLabel, EntrySignal, LongTermPrediction, Prediction, TargetPrice, TargetPriceError,
};
use stockscope_core::score::{
    combine, fundamental_score, momentum_score, technical_score, OverallScore, ScoreConfig,
};
use stockscope_core::sentiment::{SentimentProvider, SentimentRating};

/// Why a single symbol's analysis failed. Batch runs collect these per
/// symbol instead of aborting.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Target(#[from] TargetPriceError),
}

/// The three horizon forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecasts {
    pub tomorrow: Assessment<Prediction>,
    pub next_week: Assessment<Prediction>,
    pub long_term: Assessment<LongTermPrediction>,
}

/// Complete analysis report for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub current_price: f64,
    pub bar_count: usize,
    pub overall: OverallScore,
    pub technical: ScoreComponent,
    pub fundamental: ScoreComponent,
    pub momentum: ScoreComponent,
    pub sentiment_score: f64,
    pub sentiment_rating: SentimentRating,
    pub forecasts: Forecasts,
    pub entry: Assessment<EntrySignal>,
    pub targets: TargetPrice,
    pub metrics: Metrics,
    pub analyzed_at: NaiveDateTime,
}

/// Result of a batch run: the reports that succeeded and the symbols that
/// did not, with their errors.
#[derive(Debug)]
pub struct BatchOutcome {
    pub analyses: Vec<StockAnalysis>,
    pub failures: Vec<(String, AnalyzeError)>,
}

/// Buy-now recommendation tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyVerdict {
    StrongBuy,
    Buy,
    Consider,
    Wait,
}

impl fmt::Display for BuyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BuyVerdict::StrongBuy => "YES - Strong Buy",
            BuyVerdict::Buy => "YES - Buy",
            BuyVerdict::Consider => "MAYBE - Consider",
            BuyVerdict::Wait => "NO - Wait",
        };
        write!(f, "{label}")
    }
}

/// The answer to "should I buy this right now?".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyAdvice {
    pub symbol: String,
    pub verdict: BuyVerdict,
    pub reason: String,
    pub score: f64,
    pub current_price: f64,
    pub target_price: f64,
    pub stop_loss: f64,
}

/// The analysis engine front door: provider + sentiment source + score
/// config, fixed at construction.
pub struct Analyzer {
    provider: Box<dyn MarketDataProvider>,
    sentiment: Box<dyn SentimentProvider>,
    config: ScoreConfig,
}

impl Analyzer {
    pub fn new(
        provider: Box<dyn MarketDataProvider>,
        sentiment: Box<dyn SentimentProvider>,
        config: ScoreConfig,
    ) -> Self {
        Self {
            provider,
            sentiment,
            config,
        }
    }

    /// Run the full pipeline for one symbol.
    ///
    /// A missing price series is an error; missing fundamentals degrade to
    /// the fundamental scorer's neutral fallback instead.
    pub fn analyze(&self, symbol: &str, period: Period) -> Result<StockAnalysis, AnalyzeError> {
        let bars = self.provider.price_history(symbol, period)?;
        let current_price = match bars.last() {
            Some(bar) => bar.close,
            None => {
                return Err(AnalyzeError::NoData {
                    symbol: symbol.to_string(),
                })
            }
        };

        let metrics = self.provider.fundamentals(symbol).unwrap_or_default();

        // Independent reads of the immutable series
        let technical = technical_score(&bars);
        let fundamental = fundamental_score(&metrics);
        let momentum = momentum_score(&bars);
        let sentiment_score = self.sentiment.score(symbol, &bars);

        let overall = combine(
            &self.config,
            &technical,
            &fundamental,
            sentiment_score,
            &momentum,
        );

        let forecasts = Forecasts {
            tomorrow: predict_short_term(&bars, 1),
            next_week: predict_medium_term(&bars, 1),
            long_term: predict_long_term(&bars, 12),
        };

        // These two consume the combined score, so they run last
        let entry = entry_point(&bars, overall.value);
        let targets = target_price(current_price, overall.value)?;

        Ok(StockAnalysis {
            symbol: symbol.to_string(),
            current_price,
            bar_count: bars.len(),
            overall,
            technical,
            fundamental,
            momentum,
            sentiment_score,
            sentiment_rating: SentimentRating::from_score(sentiment_score),
            forecasts,
            entry,
            targets,
            metrics,
            analyzed_at: chrono::Local::now().naive_local(),
        })
    }

    /// Analyze a list of symbols in parallel. Per-symbol failures are
    /// collected, never fatal to the batch.
    pub fn analyze_many(&self, symbols: &[String], period: Period) -> BatchOutcome {
        let results: Vec<(String, Result<StockAnalysis, AnalyzeError>)> = symbols
            .par_iter()
            .map(|symbol| (symbol.clone(), self.analyze(symbol, period)))
            .collect();

        let mut outcome = BatchOutcome {
            analyses: Vec::new(),
            failures: Vec::new(),
        };
        for (symbol, result) in results {
            match result {
                Ok(analysis) => outcome.analyses.push(analysis),
                Err(error) => outcome.failures.push((symbol, error)),
            }
        }
        outcome
    }

    /// Should this stock be bought right now? Folds the overall score and
    /// the entry label into a four-tier verdict over a 6-month window.
    pub fn should_buy_now(&self, symbol: &str) -> Result<BuyAdvice, AnalyzeError> {
        let analysis = self.analyze(symbol, Period::SixMonths)?;
        let score = analysis.overall.value;
        let sentiment = analysis.sentiment_rating;

        let entry_label = analysis.entry.ready().map(|e| e.label);
        let good_entry = matches!(
            entry_label,
            Some(EntryLabel::StrongBuyNow | EntryLabel::GoodEntryPoint)
        );
        let reasonable_entry = good_entry || matches!(entry_label, Some(EntryLabel::ConsiderBuying));

        let (verdict, reason) = if score >= 70.0 && good_entry {
            (
                BuyVerdict::StrongBuy,
                format!("High score ({score}/100) and good entry point. {sentiment} sentiment."),
            )
        } else if score >= 60.0 && reasonable_entry {
            (
                BuyVerdict::Buy,
                format!("Good score ({score}/100) and reasonable entry. {sentiment} sentiment."),
            )
        } else if score >= 50.0 && good_entry {
            (
                BuyVerdict::Consider,
                format!(
                    "Average score ({score}/100) but good entry point. {sentiment} sentiment."
                ),
            )
        } else {
            let entry_text = match &analysis.entry {
                Assessment::Ready(signal) => signal.label.to_string(),
                Assessment::Unavailable(shortfall) => shortfall.to_string(),
            };
            (
                BuyVerdict::Wait,
                format!("Score: {score}/100. {entry_text}. {sentiment} sentiment."),
            )
        };

        Ok(BuyAdvice {
            symbol: symbol.to_string(),
            verdict,
            reason,
            score,
            current_price: analysis.current_price,
            target_price: analysis.targets.target_price,
            stop_loss: analysis.targets.stop_loss,
        })
    }
}
