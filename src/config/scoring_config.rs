//! Scoring window, placeholder-confidence band and price simulation factors.

use super::parse_env;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Number of most recent records scored per run
    pub window: usize,
    pub confidence_low: f64,
    pub confidence_high: f64,
    /// Fixed seed for the placeholder confidence; entropy when unset
    pub confidence_seed: Option<u64>,
    /// Close multiplier when a model predicts the positive class
    pub price_up_factor: f64,
    /// Close multiplier otherwise
    pub price_down_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            window: 30,
            confidence_low: 0.85,
            confidence_high: 0.98,
            confidence_seed: None,
            price_up_factor: 1.015,
            price_down_factor: 0.985,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let confidence_seed = match std::env::var("CONFIDENCE_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_env("CONFIDENCE_SEED", 0u64)?),
            _ => None,
        };

        Ok(Self {
            window: parse_env("SCORING_WINDOW", defaults.window)?,
            confidence_low: parse_env("CONFIDENCE_LOW", defaults.confidence_low)?,
            confidence_high: parse_env("CONFIDENCE_HIGH", defaults.confidence_high)?,
            confidence_seed,
            price_up_factor: parse_env("PRICE_UP_FACTOR", defaults.price_up_factor)?,
            price_down_factor: parse_env("PRICE_DOWN_FACTOR", defaults.price_down_factor)?,
        })
    }
}
