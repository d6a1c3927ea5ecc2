//! Layer counts of the VQC circuits. Must match the values the weights were trained with.

use super::parse_env;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    pub feature_map_reps: usize,
    pub ansatz_reps: usize,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            feature_map_reps: 2,
            ansatz_reps: 3,
        }
    }
}

impl CircuitConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            feature_map_reps: parse_env("FEATURE_MAP_REPS", defaults.feature_map_reps)?,
            ansatz_reps: parse_env("ANSATZ_REPS", defaults.ansatz_reps)?,
        })
    }
}
