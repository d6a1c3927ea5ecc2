//! Configuration module for qsignal.
//!
//! Configuration is loaded from environment variables (after `.env`) or from a TOML file
//! with the same sections, organized by concern: Artifacts, Dataset, Scoring and Circuit.

mod artifact_config;
mod circuit_config;
mod dataset_config;
mod scoring_config;

pub use artifact_config::ArtifactConfig;
pub use circuit_config::CircuitConfig;
pub use dataset_config::DatasetConfig;
pub use scoring_config::ScoringConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub dataset: DatasetConfig,
    pub scoring: ScoringConfig,
    pub circuit: CircuitConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            artifacts: ArtifactConfig::from_env(),
            dataset: DatasetConfig::from_env()?,
            scoring: ScoringConfig::from_env()?,
            circuit: CircuitConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        if scoring.window == 0 {
            anyhow::bail!("SCORING_WINDOW must be greater than 0");
        }
        if !(0.0..=1.0).contains(&scoring.confidence_low)
            || !(0.0..=1.0).contains(&scoring.confidence_high)
            || scoring.confidence_low >= scoring.confidence_high
        {
            anyhow::bail!(
                "Invalid confidence band [{}, {}): bounds must satisfy 0 <= low < high <= 1",
                scoring.confidence_low,
                scoring.confidence_high
            );
        }
        if !(scoring.price_up_factor > 0.0) || !(scoring.price_down_factor > 0.0) {
            anyhow::bail!(
                "Price factors must be positive (up={}, down={})",
                scoring.price_up_factor,
                scoring.price_down_factor
            );
        }
        if self.dataset.skip_rows == 0 {
            anyhow::bail!("DATASET_SKIP_ROWS must be at least 1 (the header line)");
        }
        if self.dataset.date_source_column.trim().is_empty() {
            anyhow::bail!("DATE_SOURCE_COLUMN must not be empty");
        }
        Ok(())
    }
}

/// Reads `key` from the environment, falling back to `default` when unset.
pub(crate) fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
