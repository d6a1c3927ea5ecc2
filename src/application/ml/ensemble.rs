use crate::domain::errors::{ModelError, StartupError};
use crate::domain::ports::BinaryClassifier;
use crate::domain::types::ScaledFeatureVector;
use tracing::info;

/// Outputs of both models for one scaled feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleOutput {
    pub svm_label: u8,
    pub svm_confidence: f64,
    pub vqc_label: u8,
}

/// The classical and the quantum classifier, validated against one feature width.
pub struct ModelEnsemble {
    svm: Box<dyn BinaryClassifier>,
    vqc: Box<dyn BinaryClassifier>,
    num_features: usize,
}

impl ModelEnsemble {
    /// Checks both models against `num_features` and warms them up.
    pub fn new(
        svm: Box<dyn BinaryClassifier>,
        vqc: Box<dyn BinaryClassifier>,
        num_features: usize,
    ) -> Result<Self, StartupError> {
        for model in [&svm, &vqc] {
            if model.num_features() != num_features {
                return Err(StartupError::DimensionMismatch {
                    component: model.name().to_string(),
                    expected: num_features,
                    actual: model.num_features(),
                });
            }
        }

        svm.warmup()?;
        vqc.warmup()?;
        info!(
            "Model ensemble ready: [{}] [{}]",
            svm.describe(),
            vqc.describe()
        );

        Ok(Self {
            svm,
            vqc,
            num_features,
        })
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn svm(&self) -> &dyn BinaryClassifier {
        self.svm.as_ref()
    }

    pub fn vqc(&self) -> &dyn BinaryClassifier {
        self.vqc.as_ref()
    }

    pub fn evaluate(&self, features: &ScaledFeatureVector) -> Result<EnsembleOutput, ModelError> {
        let (svm_label, [p0, p1]) = self.svm.classify(features)?;
        let vqc_label = self.vqc.predict(features)?;

        Ok(EnsembleOutput {
            svm_label,
            svm_confidence: p0.max(p1),
            vqc_label,
        })
    }
}
