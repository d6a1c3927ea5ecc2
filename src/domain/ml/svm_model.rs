use crate::domain::errors::StartupError;
use serde::{Deserialize, Serialize};

/// Kernel the support vectors were fitted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KernelSpec {
    Linear,
    Rbf { gamma: f64 },
    Poly { degree: f64, gamma: f64, coef0: f64 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl KernelSpec {
    pub fn name(&self) -> &'static str {
        match self {
            KernelSpec::Linear => "linear",
            KernelSpec::Rbf { .. } => "rbf",
            KernelSpec::Poly { .. } => "poly",
            KernelSpec::Sigmoid { .. } => "sigmoid",
        }
    }
}

fn default_classes() -> [u8; 2] {
    [0, 1]
}

/// Serialized binary kernel SVM.
///
/// Decision value: `f(x) = sum(dual_coef[i] * K(support_vectors[i], x)) + intercept`,
/// positive values select `classes[1]`. `prob_a`/`prob_b` are the Platt sigmoid
/// coefficients as libsvm stores them, fitted on the opposite-sign decision value, so
/// `p(classes[1]) = 1 / (1 + exp(prob_a * f(x) - prob_b))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmModelData {
    pub kernel: KernelSpec,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    pub prob_a: f64,
    pub prob_b: f64,
    #[serde(default = "default_classes")]
    pub classes: [u8; 2],
}

impl SvmModelData {
    /// Width of the support vectors (0 when there are none).
    pub fn num_features(&self) -> usize {
        self.support_vectors.first().map(Vec::len).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        let invalid = |reason: String| StartupError::InvalidArtifact {
            artifact: "SVM model",
            reason,
        };

        if self.support_vectors.is_empty() {
            return Err(invalid("no support vectors".to_string()));
        }
        if self.dual_coef.len() != self.support_vectors.len() {
            return Err(invalid(format!(
                "{} dual coefficients for {} support vectors",
                self.dual_coef.len(),
                self.support_vectors.len()
            )));
        }

        let width = self.num_features();
        if width == 0 {
            return Err(invalid("support vectors are empty".to_string()));
        }
        for (i, sv) in self.support_vectors.iter().enumerate() {
            if sv.len() != width {
                return Err(invalid(format!(
                    "support vector {} has {} values, expected {}",
                    i,
                    sv.len(),
                    width
                )));
            }
            if sv.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("support vector {} is not finite", i)));
            }
        }

        let scalars = [self.intercept, self.prob_a, self.prob_b];
        if self.dual_coef.iter().chain(scalars.iter()).any(|v| !v.is_finite()) {
            return Err(invalid("non-finite coefficient".to_string()));
        }

        if self.classes[0] == self.classes[1] || self.classes.iter().any(|c| *c > 1) {
            return Err(invalid(format!(
                "classes must be the two binary labels, got {:?}",
                self.classes
            )));
        }

        match self.kernel {
            KernelSpec::Rbf { gamma } if !(gamma > 0.0) => {
                Err(invalid(format!("rbf gamma must be positive, got {}", gamma)))
            }
            KernelSpec::Poly { degree, .. } if !(degree >= 1.0) => {
                Err(invalid(format!("poly degree must be >= 1, got {}", degree)))
            }
            _ => Ok(()),
        }
    }
}
