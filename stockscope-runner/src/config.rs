//! Analyzer configuration.
//!
//! TOML-loadable weights/thresholds/cache settings with the engine
//! defaults, validated on load so a bad weighting scheme fails fast
//! instead of silently skewing every score.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use stockscope_core::score::{RatingThresholds, ScoreConfig, ScoreWeights};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("component weights must sum to 1.0 (got {0})")]
    WeightSum(f64),

    #[error("rating thresholds must descend: strong_buy > buy > hold > sell")]
    ThresholdOrder,
}

/// Runner-level configuration: engine constants plus provider-cache TTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub weights: ScoreWeights,
    pub thresholds: RatingThresholds,
    /// Provider memo cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            thresholds: RatingThresholds::default(),
            cache_ttl_secs: 300,
        }
    }
}

impl AnalyzerConfig {
    /// Load and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }

        let t = &self.thresholds;
        if !(t.strong_buy > t.buy && t.buy > t.hold && t.hold > t.sell) {
            return Err(ConfigError::ThresholdOrder);
        }

        Ok(())
    }

    /// The immutable engine config this file describes.
    pub fn score_config(&self) -> ScoreConfig {
        ScoreConfig {
            weights: self.weights,
            thresholds: self.thresholds,
        }
    }
}
