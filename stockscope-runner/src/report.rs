//! Report export: per-symbol JSON artifacts and CSV ranking tables.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::StockAnalysis;
use stockscope_core::domain::Assessment;

/// Write one analysis as pretty JSON to `{dir}/{SYMBOL}.json`.
///
/// Returns the path written. Creates the directory if needed.
pub fn save_analysis(analysis: &StockAnalysis, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output dir {}", dir.display()))?;

    let path = dir.join(format!("{}.json", analysis.symbol));
    let json = serde_json::to_string_pretty(analysis).context("serializing analysis")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Write a ranking table as CSV: one row per analysis, in the given order.
pub fn write_ranking_csv(analyses: &[StockAnalysis], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output dir {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record([
        "symbol",
        "price",
        "score",
        "rating",
        "stars",
        "tomorrow",
        "sentiment",
        "entry_signal",
    ])?;

    for analysis in analyses {
        let tomorrow = match &analysis.forecasts.tomorrow {
            Assessment::Ready(p) => {
                format!("{} {:.1}%", p.direction, p.predicted_change_pct.abs())
            }
            Assessment::Unavailable(shortfall) => shortfall.to_string(),
        };
        let entry = match &analysis.entry {
            Assessment::Ready(signal) => signal.label.to_string(),
            Assessment::Unavailable(shortfall) => shortfall.to_string(),
        };

        writer.write_record([
            analysis.symbol.clone(),
            format!("{:.2}", analysis.current_price),
            format!("{:.1}", analysis.overall.value),
            analysis.overall.rating.to_string(),
            "*".repeat(analysis.overall.stars as usize),
            tomorrow,
            analysis.sentiment_rating.to_string(),
            entry,
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tests::analyzer;
    use std::sync::atomic::{AtomicU64, Ordering};
    use stockscope_core::data::Period;

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir =
            std::env::temp_dir().join(format!("stockscope_report_{}_{id}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn saves_analysis_json() {
        let dir = temp_dir();
        let report = analyzer().analyze("ACME", Period::OneYear).unwrap();

        let path = save_analysis(&report, &dir).unwrap();
        assert!(path.ends_with("ACME.json"));

        let content = fs::read_to_string(&path).unwrap();
        let back: StockAnalysis = serde_json::from_str(&content).unwrap();
        assert_eq!(back.symbol, "ACME");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writes_ranking_csv_with_header_and_rows() {
        let dir = temp_dir();
        let a = analyzer();
        let analyses = vec![
            a.analyze("ACME", Period::OneYear).unwrap(),
            a.analyze("WIDGET", Period::OneYear).unwrap(),
        ];

        let path = dir.join("ranking.csv");
        write_ranking_csv(&analyses, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("symbol,price,score,rating"));
        assert!(lines[1].starts_with("ACME,"));

        let _ = fs::remove_dir_all(&dir);
    }
}
