//! Dataset location and layout.

use super::parse_env;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Lines skipped from the top of the file, header line included.
    /// The first of them names the columns.
    pub skip_rows: usize,
    /// Header name of the date column, renamed to `Date` on load
    pub date_source_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/dataset.csv"),
            skip_rows: 3,
            date_source_column: "Price".to_string(),
        }
    }
}

impl DatasetConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            skip_rows: parse_env("DATASET_SKIP_ROWS", defaults.skip_rows)?,
            date_source_column: env::var("DATE_SOURCE_COLUMN")
                .unwrap_or(defaults.date_source_column),
        })
    }
}
