use crate::application::ml::ensemble::ModelEnsemble;
use crate::application::ml::preprocessor::FeaturePreprocessor;
use crate::domain::errors::StartupError;
use serde::Serialize;

/// Everything a scoring run needs that was loaded at startup.
///
/// Built once, then shared read-only (usually behind an `Arc`) by any number of runs.
pub struct ScoringContext {
    preprocessor: FeaturePreprocessor,
    ensemble: ModelEnsemble,
}

/// Summary of the loaded artifacts, printed by `qsignal inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSummary {
    pub features: Vec<String>,
    pub scaler: String,
    pub svm: String,
    pub vqc: String,
}

impl ScoringContext {
    pub fn new(
        preprocessor: FeaturePreprocessor,
        ensemble: ModelEnsemble,
    ) -> Result<Self, StartupError> {
        if preprocessor.num_features() != ensemble.num_features() {
            return Err(StartupError::DimensionMismatch {
                component: "model ensemble".to_string(),
                expected: preprocessor.num_features(),
                actual: ensemble.num_features(),
            });
        }
        Ok(Self {
            preprocessor,
            ensemble,
        })
    }

    pub fn preprocessor(&self) -> &FeaturePreprocessor {
        &self.preprocessor
    }

    pub fn ensemble(&self) -> &ModelEnsemble {
        &self.ensemble
    }

    pub fn feature_names(&self) -> &[String] {
        self.preprocessor.feature_names()
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            features: self.feature_names().to_vec(),
            scaler: self.preprocessor.scaler().kind().to_string(),
            svm: self.ensemble.svm().describe(),
            vqc: self.ensemble.vqc().describe(),
        }
    }
}
