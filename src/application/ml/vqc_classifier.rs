use crate::domain::errors::{ModelError, StartupError};
use crate::domain::ports::BinaryClassifier;
use crate::domain::quantum::{MAX_QUBITS, QuantumCircuit, RealAmplitudes, ZZFeatureMap};
use crate::domain::types::ScaledFeatureVector;
use tracing::{debug, info};

const NUM_CLASSES: usize = 2;

/// Variational quantum classifier evaluated by exact statevector simulation.
///
/// The circuit is the ZZ feature map followed by the real-amplitudes ansatz, one qubit per
/// feature. Measured basis states are folded onto classes by `index % 2`, i.e. the parity
/// read from qubit 0. The trained weights are bound once at construction and never change.
pub struct VariationalQuantumClassifier {
    feature_map: ZZFeatureMap,
    ansatz: RealAmplitudes,
    // Ansatz with the trained weights already bound
    trained_ansatz: QuantumCircuit,
    weights: Vec<f64>,
}

impl VariationalQuantumClassifier {
    pub fn new(
        num_features: usize,
        feature_map_reps: usize,
        ansatz_reps: usize,
        weights: Vec<f64>,
    ) -> Result<Self, StartupError> {
        if num_features == 0 || num_features > MAX_QUBITS {
            return Err(StartupError::InvalidArtifact {
                artifact: "VQC configuration",
                reason: format!(
                    "{} qubits requested, supported range is 1..={}",
                    num_features, MAX_QUBITS
                ),
            });
        }

        let feature_map = ZZFeatureMap::new(num_features, feature_map_reps);
        let ansatz = RealAmplitudes::new(num_features, ansatz_reps);

        if weights.len() != ansatz.num_parameters() {
            // Express the mismatch in features so it reads against the selected list
            let implied_features = weights.len() / (ansatz_reps + 1);
            return Err(StartupError::DimensionMismatch {
                component: format!(
                    "VQC weights ({} values, {} per feature)",
                    weights.len(),
                    ansatz_reps + 1
                ),
                expected: num_features,
                actual: implied_features,
            });
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(StartupError::InvalidArtifact {
                artifact: "VQC weights",
                reason: format!("weight {} is not finite", index),
            });
        }

        let trained_ansatz = ansatz.bind(&weights);
        info!(
            "VQC rehydrated: {} qubits, feature map reps={}, ansatz reps={}, {} weights",
            num_features,
            feature_map_reps,
            ansatz_reps,
            weights.len()
        );

        Ok(Self {
            feature_map,
            ansatz,
            trained_ansatz,
            weights,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.ansatz.num_qubits
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Class probabilities for an already validated input.
    fn class_probabilities(&self, x: &[f64]) -> Result<[f64; 2], ModelError> {
        let circuit = self.feature_map.bind(x).compose(&self.trained_ansatz);
        let probs = circuit.probabilities();

        let mut classes = [0.0; NUM_CLASSES];
        for (index, p) in probs.iter().enumerate() {
            classes[index % NUM_CLASSES] += p;
        }

        let total = classes[0] + classes[1];
        if !total.is_finite() || (total - 1.0).abs() > 1e-9 {
            return Err(ModelError::Inference {
                model: self.name().to_string(),
                reason: format!("measurement distribution sums to {}", total),
            });
        }
        Ok(classes)
    }
}

impl BinaryClassifier for VariationalQuantumClassifier {
    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<[f64; 2], ModelError> {
        features.check_input(self.name(), self.num_features())?;
        self.class_probabilities(features.as_slice())
    }

    /// Runs the bound circuit once on a zero input. The trained weights are untouched.
    fn warmup(&self) -> Result<(), ModelError> {
        let zeros = vec![0.0; self.num_features()];
        let probs = self.class_probabilities(&zeros)?;
        debug!("VQC warmup distribution: {:?}", probs);
        Ok(())
    }

    fn num_features(&self) -> usize {
        self.feature_map.feature_dimension
    }

    fn name(&self) -> &str {
        "VQC"
    }

    fn describe(&self) -> String {
        format!(
            "VQC: {} qubits, ZZ feature map reps={}, real-amplitudes reps={}, {} weights",
            self.num_qubits(),
            self.feature_map.reps,
            self.ansatz.reps,
            self.weights.len()
        )
    }
}
