//! Model artifact locations.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Paths of the four artifacts the models are rehydrated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub svm_model_path: PathBuf,
    pub vqc_weights_path: PathBuf,
    pub selected_features_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            svm_model_path: PathBuf::from("models/svm_model.json"),
            vqc_weights_path: PathBuf::from("models/vqc_weights.json"),
            selected_features_path: PathBuf::from("models/selected_features.json"),
            scaler_path: PathBuf::from("models/feature_scaler.json"),
        }
    }
}

impl ArtifactConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| {
            env::var(key).map(PathBuf::from).unwrap_or(default)
        };

        Self {
            svm_model_path: path("SVM_MODEL_PATH", defaults.svm_model_path),
            vqc_weights_path: path("VQC_WEIGHTS_PATH", defaults.vqc_weights_path),
            selected_features_path: path(
                "SELECTED_FEATURES_PATH",
                defaults.selected_features_path,
            ),
            scaler_path: path("SCALER_PATH", defaults.scaler_path),
        }
    }

    /// Points every artifact at `dir`, keeping the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            svm_model_path: dir.join("svm_model.json"),
            vqc_weights_path: dir.join("vqc_weights.json"),
            selected_features_path: dir.join("selected_features.json"),
            scaler_path: dir.join("feature_scaler.json"),
        }
    }
}
