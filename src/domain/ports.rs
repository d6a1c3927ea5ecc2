use crate::domain::errors::{ModelError, ScoringError, StartupError};
use crate::domain::ml::feature_scaler::FeatureScaler;
use crate::domain::ml::svm_model::SvmModelData;
use crate::domain::types::{Dataset, ScaledFeatureVector};

/// Source of the time series being scored.
///
/// Implementations own every file-format quirk; callers only see typed records.
pub trait DatasetLoader: Send + Sync {
    fn load(&self) -> Result<Dataset, ScoringError>;

    /// Human readable origin (path, "memory", ...) for logs
    fn source(&self) -> String;
}

/// Supplies the four artifacts the models are rehydrated from.
pub trait ArtifactStore: Send + Sync {
    fn load_svm_model(&self) -> Result<SvmModelData, StartupError>;
    fn load_vqc_weights(&self) -> Result<Vec<f64>, StartupError>;
    fn load_selected_features(&self) -> Result<Vec<String>, StartupError>;
    fn load_scaler(&self) -> Result<FeatureScaler, StartupError>;
}

/// Interface for pretrained binary classifiers
pub trait BinaryClassifier: Send + Sync {
    /// Class probabilities `[p(0), p(1)]`
    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<[f64; 2], ModelError>;

    /// Predicted label (0 or 1). Defaults to the most probable class.
    fn predict(&self, features: &ScaledFeatureVector) -> Result<u8, ModelError> {
        let [p0, p1] = self.predict_proba(features)?;
        Ok(if p1 > p0 { 1 } else { 0 })
    }

    /// Label and probabilities from one evaluation. Defaults to the most probable class.
    fn classify(&self, features: &ScaledFeatureVector) -> Result<(u8, [f64; 2]), ModelError> {
        let proba = self.predict_proba(features)?;
        let label = if proba[1] > proba[0] { 1 } else { 0 };
        Ok((label, proba))
    }

    /// Bind internal state before the first real inference. Must not alter trained weights.
    fn warmup(&self) -> Result<(), ModelError> {
        Ok(())
    }

    /// Input width the model was fitted with
    fn num_features(&self) -> usize;

    fn name(&self) -> &str;

    /// One-line description of the loaded model
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

/// Placeholder confidence values, one per scored record.
pub trait ConfidenceSource {
    fn next_confidence(&mut self) -> f64;
}
