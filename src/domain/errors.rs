use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating fitted scaler parameters
#[derive(Debug, Error, PartialEq)]
pub enum ScalerError {
    #[error("Scaler has {actual} {name} values for {expected} features")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Scaler parameter {name}[{index}] is not finite")]
    NonFinite { name: &'static str, index: usize },

    #[error("Scaler range for feature {index} is inverted: min {min} > max {max}")]
    InvertedRange { index: usize, min: f64, max: f64 },

    #[error("Scaler scale for feature {index} is zero")]
    ZeroScale { index: usize },

    #[error("Invalid feature range: ({low}, {high})")]
    InvalidFeatureRange { low: f64, high: f64 },
}

/// Errors raised by a classifier while scoring a single feature vector
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("{model}: expected {expected} features, got {actual}")]
    DimensionMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("{model}: feature {index} is not finite")]
    NonFiniteInput { model: String, index: usize },

    #[error("{model}: inference failed: {reason}")]
    Inference { model: String, reason: String },
}

/// Fatal errors while rehydrating the models. The process must not serve predictions.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Artifact not found: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("Failed to read artifact {}: {source}", path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {}: {source}", path.display())]
    ArtifactCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {artifact}: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },

    #[error("Invalid feature scaler: {0}")]
    Scaler(#[from] ScalerError),

    #[error("Dimension mismatch: {component} is built for {actual} features, {expected} are selected")]
    DimensionMismatch {
        component: String,
        expected: usize,
        actual: usize,
    },

    #[error("Model warmup failed: {0}")]
    Warmup(#[from] ModelError),
}

/// Errors that abort a scoring batch. Each one is reported as a single error payload.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Data file not found at {}", path.display())]
    DataSourceMissing { path: PathBuf },

    #[error("Failed to read data file {}: {source}", path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process CSV file: {0}")]
    DataFormat(String),

    #[error("Dataset is missing selected feature columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Inference failed for record {date}: {source}")]
    Model {
        date: NaiveDate,
        #[source]
        source: ModelError,
    },
}

impl ScoringError {
    /// True when the failure comes from the dataset rather than the models.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ScoringError::DataSourceMissing { .. }
                | ScoringError::DataSource { .. }
                | ScoringError::DataFormat(_)
                | ScoringError::MissingColumns(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_file_mentions_path() {
        let err = ScoringError::DataSourceMissing {
            path: PathBuf::from("data/dataset.csv"),
        };
        assert_eq!(err.to_string(), "Data file not found at data/dataset.csv");
        assert!(err.is_data_error());
    }

    #[test]
    fn test_model_error_is_not_data_error() {
        let err = ScoringError::Model {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            source: ModelError::NonFiniteInput {
                model: "VQC".to_string(),
                index: 2,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-01"));
        assert!(msg.contains("feature 2"));
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_missing_columns_formatting() {
        let err = ScoringError::MissingColumns(vec!["rsi".to_string(), "macd".to_string()]);
        assert_eq!(
            err.to_string(),
            "Dataset is missing selected feature columns: rsi, macd"
        );
    }

    #[test]
    fn test_startup_dimension_mismatch_formatting() {
        let err = StartupError::DimensionMismatch {
            component: "VQC weights".to_string(),
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("VQC weights"));
        assert!(msg.contains('4'));
        assert!(msg.contains('3'));
    }
}
