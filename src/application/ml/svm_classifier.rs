use crate::domain::errors::{ModelError, StartupError};
use crate::domain::ml::svm_model::{KernelSpec, SvmModelData};
use crate::domain::ports::BinaryClassifier;
use crate::domain::types::ScaledFeatureVector;
use smartcore::svm::{Kernel, Kernels};
use tracing::info;

/// Pretrained kernel SVM with Platt-scaled probabilities.
pub struct SupportVectorClassifier {
    kernel: Kernels,
    model: SvmModelData,
    name: String,
}

impl SupportVectorClassifier {
    pub fn from_model_data(model: SvmModelData) -> Result<Self, StartupError> {
        model.validate()?;

        let kernel = match model.kernel {
            KernelSpec::Linear => Kernels::linear(),
            KernelSpec::Rbf { gamma } => Kernels::rbf().with_gamma(gamma),
            KernelSpec::Poly {
                degree,
                gamma,
                coef0,
            } => Kernels::polynomial()
                .with_degree(degree)
                .with_gamma(gamma)
                .with_coef0(coef0),
            KernelSpec::Sigmoid { gamma, coef0 } => {
                Kernels::sigmoid().with_gamma(gamma).with_coef0(coef0)
            }
        };

        let name = format!("SVM ({})", model.kernel.name());
        info!(
            "{} rehydrated: {} support vectors, {} features",
            name,
            model.support_vectors.len(),
            model.num_features()
        );

        Ok(Self {
            kernel,
            model,
            name,
        })
    }

    /// Signed distance to the separating surface; positive selects `classes[1]`.
    pub fn decision_function(&self, features: &ScaledFeatureVector) -> Result<f64, ModelError> {
        features.check_input(&self.name, self.num_features())?;
        let x = features.as_slice().to_vec();

        let mut sum = self.model.intercept;
        for (sv, alpha) in self.model.support_vectors.iter().zip(&self.model.dual_coef) {
            let k = self.kernel.apply(sv, &x).map_err(|e| ModelError::Inference {
                model: self.name.clone(),
                reason: format!("kernel evaluation failed: {}", e),
            })?;
            sum += alpha * k;
        }

        if !sum.is_finite() {
            return Err(ModelError::Inference {
                model: self.name.clone(),
                reason: format!("decision value is {}", sum),
            });
        }
        Ok(sum)
    }

    /// Platt sigmoid `1 / (1 + exp(A·f - B))`, written to avoid overflow in `exp`.
    fn positive_probability(&self, decision: f64) -> f64 {
        let fapb = self.model.prob_a * decision - self.model.prob_b;
        if fapb >= 0.0 {
            let e = (-fapb).exp();
            e / (1.0 + e)
        } else {
            1.0 / (1.0 + fapb.exp())
        }
    }

    fn label_for(&self, decision: f64) -> u8 {
        if decision > 0.0 {
            self.model.classes[1]
        } else {
            self.model.classes[0]
        }
    }

    /// Probabilities indexed by label; Platt scores `classes[1]`.
    fn proba_for(&self, decision: f64) -> [f64; 2] {
        let p_second = self.positive_probability(decision);
        if self.model.classes[1] == 1 {
            [1.0 - p_second, p_second]
        } else {
            [p_second, 1.0 - p_second]
        }
    }

    /// Maximum class probability
    pub fn confidence(&self, features: &ScaledFeatureVector) -> Result<f64, ModelError> {
        let [p0, p1] = self.predict_proba(features)?;
        Ok(p0.max(p1))
    }
}

impl BinaryClassifier for SupportVectorClassifier {
    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<[f64; 2], ModelError> {
        let decision = self.decision_function(features)?;
        Ok(self.proba_for(decision))
    }

    fn predict(&self, features: &ScaledFeatureVector) -> Result<u8, ModelError> {
        let decision = self.decision_function(features)?;
        Ok(self.label_for(decision))
    }

    fn classify(&self, features: &ScaledFeatureVector) -> Result<(u8, [f64; 2]), ModelError> {
        let decision = self.decision_function(features)?;
        Ok((self.label_for(decision), self.proba_for(decision)))
    }

    fn num_features(&self) -> usize {
        self.model.num_features()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}: {} support vectors over {} features",
            self.name,
            self.model.support_vectors.len(),
            self.model.num_features()
        )
    }
}
