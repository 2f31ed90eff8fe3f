//! End-to-end engine test: price series + metrics through the scorers,
//! combiner and predictor, the way the runner drives them.

use chrono::NaiveDate;

use stockscope_core::domain::{Bar, Metric, Metrics};
use stockscope_core::predict::{
    entry_point, predict_long_term, predict_medium_term, predict_short_term, target_price,
    Direction,
};
use stockscope_core::score::{
    combine, fundamental_score, momentum_score, technical_score, ScoreConfig,
};
use stockscope_core::sentiment::{MarketSentiment, SentimentProvider};

/// A year of gently rising prices with mild oscillation and growing volume.
fn healthy_series(rows: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    (0..rows)
        .map(|i| {
            let trend = 100.0 + i as f64 * 0.3;
            let wobble = (i as f64 * 0.7).sin() * 1.5;
            let close = trend + wobble;
            let open = close - 0.4;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: close + 1.2,
                low: open - 1.2,
                close,
                volume: 10_000 + (i as u64) * 25,
            }
        })
        .collect()
}

fn decent_metrics() -> Metrics {
    [
        (Metric::PeRatio, 21.0),
        (Metric::PegRatio, 1.4),
        (Metric::PriceToBook, 4.2),
        (Metric::DebtToEquity, 0.8),
        (Metric::Roe, 0.17),
        (Metric::ProfitMargin, 0.14),
        (Metric::RevenueGrowth, 0.12),
        (Metric::DividendYield, 0.011),
        (Metric::Beta, 1.1),
    ]
    .into_iter()
    .collect()
}

#[test]
fn full_pipeline_on_a_healthy_symbol() {
    let bars = healthy_series(300);
    let metrics = decent_metrics();

    // Component scorers are independent reads of the same series
    let technical = technical_score(&bars);
    let fundamental = fundamental_score(&metrics);
    let momentum = momentum_score(&bars);
    let sentiment = MarketSentiment::new().score("ACME", &bars);

    assert!(!technical.is_neutral());
    assert!(!fundamental.is_neutral());
    assert!(!momentum.is_neutral());
    assert!((0.0..=100.0).contains(&sentiment));

    // Combiner
    let overall = combine(
        &ScoreConfig::default(),
        &technical,
        &fundamental,
        sentiment,
        &momentum,
    );
    assert!((0.0..=100.0).contains(&overall.value));
    assert_eq!(overall.components.fundamental, fundamental.score());

    // Forecasts depend only on the series
    let tomorrow = predict_short_term(&bars, 1);
    let next_week = predict_medium_term(&bars, 1);
    let long_term = predict_long_term(&bars, 12);
    assert!(tomorrow.is_ready());
    assert!(next_week.is_ready());
    assert!(long_term.is_ready());

    let tomorrow = tomorrow.ready().unwrap();
    assert_eq!(tomorrow.direction, Direction::Up);
    assert_eq!(tomorrow.horizon, "1 day(s)");
    assert_eq!(next_week.ready().unwrap().horizon, "7 day(s)");

    // Entry and targets consume the combined score
    let entry = entry_point(&bars, overall.value);
    assert!(entry.is_ready());

    let current_price = bars.last().unwrap().close;
    let targets = target_price(current_price, overall.value).unwrap();
    assert!(targets.stop_loss < current_price);
    assert!(targets.target_price > current_price);
}

#[test]
fn thin_series_degrades_every_component_without_aborting() {
    let bars = healthy_series(15);
    let metrics = Metrics::new();

    let technical = technical_score(&bars);
    let fundamental = fundamental_score(&metrics);
    let momentum = momentum_score(&bars);
    let sentiment = MarketSentiment::new().score("ACME", &bars);

    assert!(technical.is_neutral());
    assert!(fundamental.is_neutral());
    assert!(momentum.is_neutral());

    // The blend of neutral components is itself neutral
    let overall = combine(
        &ScoreConfig::default(),
        &technical,
        &fundamental,
        sentiment,
        &momentum,
    );
    assert_eq!(overall.value, 50.0);

    // Predictors report unavailability instead of fabricating forecasts
    assert!(!predict_short_term(&bars, 1).is_ready());
    assert!(!predict_long_term(&bars, 12).is_ready());
    assert!(!entry_point(&bars, overall.value).is_ready());

    // Targets still work: they only need a price and the score
    let targets = target_price(bars.last().unwrap().close, overall.value).unwrap();
    assert_eq!(targets.upside_pct, 10.0);
}

#[test]
fn empty_series_is_handled() {
    let bars: Vec<Bar> = Vec::new();

    assert!(technical_score(&bars).is_neutral());
    assert!(momentum_score(&bars).is_neutral());
    assert!(!predict_short_term(&bars, 1).is_ready());
    assert_eq!(MarketSentiment::new().score("ACME", &bars), 50.0);
}
