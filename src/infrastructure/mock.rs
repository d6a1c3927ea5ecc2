//! In-memory implementations of the dataset and artifact ports, used by tests and demos.

use crate::domain::errors::{ScoringError, StartupError};
use crate::domain::ml::feature_scaler::FeatureScaler;
use crate::domain::ml::svm_model::SvmModelData;
use crate::domain::ports::{ArtifactStore, DatasetLoader};
use crate::domain::types::Dataset;
use std::path::PathBuf;

enum Outcome {
    Data(Dataset),
    Missing(PathBuf),
    Malformed(String),
}

pub struct InMemoryDatasetLoader {
    outcome: Outcome,
}

impl InMemoryDatasetLoader {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            outcome: Outcome::Data(dataset),
        }
    }

    /// Loader that behaves like a data file that does not exist.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self {
            outcome: Outcome::Missing(path.into()),
        }
    }

    /// Loader that behaves like an unparseable data file.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Malformed(reason.into()),
        }
    }
}

impl DatasetLoader for InMemoryDatasetLoader {
    fn load(&self) -> Result<Dataset, ScoringError> {
        match &self.outcome {
            Outcome::Data(dataset) => Ok(dataset.clone()),
            Outcome::Missing(path) => Err(ScoringError::DataSourceMissing { path: path.clone() }),
            Outcome::Malformed(reason) => Err(ScoringError::DataFormat(reason.clone())),
        }
    }

    fn source(&self) -> String {
        match &self.outcome {
            Outcome::Missing(path) => path.display().to_string(),
            _ => "memory".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryArtifactStore {
    pub svm_model: SvmModelData,
    pub vqc_weights: Vec<f64>,
    pub selected_features: Vec<String>,
    pub scaler: FeatureScaler,
}

impl ArtifactStore for InMemoryArtifactStore {
    fn load_svm_model(&self) -> Result<SvmModelData, StartupError> {
        Ok(self.svm_model.clone())
    }

    fn load_vqc_weights(&self) -> Result<Vec<f64>, StartupError> {
        Ok(self.vqc_weights.clone())
    }

    fn load_selected_features(&self) -> Result<Vec<String>, StartupError> {
        Ok(self.selected_features.clone())
    }

    fn load_scaler(&self) -> Result<FeatureScaler, StartupError> {
        Ok(self.scaler.clone())
    }
}
