//! Loads serialized model artifacts from disk.
//!
//! Every artifact is JSON: the SVM model, the VQC weights as a flat array of numbers,
//! the selected feature names as an array of strings and the tagged feature scaler.

use crate::config::ArtifactConfig;
use crate::domain::errors::StartupError;
use crate::domain::ml::feature_scaler::FeatureScaler;
use crate::domain::ml::svm_model::SvmModelData;
use crate::domain::ports::ArtifactStore;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

pub struct FileArtifactStore {
    config: ArtifactConfig,
}

impl FileArtifactStore {
    pub fn new(config: ArtifactConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArtifactConfig {
        &self.config
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StartupError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StartupError::ArtifactMissing {
            path: path.to_path_buf(),
        },
        _ => StartupError::ArtifactRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let value = serde_json::from_str(&content).map_err(|e| StartupError::ArtifactCorrupt {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Loaded artifact from {:?}", path);
    Ok(value)
}

impl ArtifactStore for FileArtifactStore {
    fn load_svm_model(&self) -> Result<SvmModelData, StartupError> {
        read_json(&self.config.svm_model_path)
    }

    fn load_vqc_weights(&self) -> Result<Vec<f64>, StartupError> {
        read_json(&self.config.vqc_weights_path)
    }

    fn load_selected_features(&self) -> Result<Vec<String>, StartupError> {
        read_json(&self.config.selected_features_path)
    }

    fn load_scaler(&self) -> Result<FeatureScaler, StartupError> {
        read_json(&self.config.scaler_path)
    }
}
