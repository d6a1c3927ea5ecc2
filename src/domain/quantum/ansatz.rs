use super::circuit::{Gate, QuantumCircuit};

/// Real-amplitudes ansatz with linear entanglement.
///
/// `reps` blocks of (RY on every qubit, CX ladder `(0,1), (1,2), ...`) followed by a final
/// RY layer. Weights are laid out layer by layer: weight `layer * n + q` rotates qubit `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealAmplitudes {
    pub num_qubits: usize,
    pub reps: usize,
}

impl RealAmplitudes {
    pub fn new(num_qubits: usize, reps: usize) -> Self {
        Self { num_qubits, reps }
    }

    pub fn num_parameters(&self) -> usize {
        self.num_qubits * (self.reps + 1)
    }

    pub fn bind(&self, weights: &[f64]) -> QuantumCircuit {
        debug_assert_eq!(weights.len(), self.num_parameters());
        let n = self.num_qubits;
        let mut circuit = QuantumCircuit::new(n);

        for (layer, rotations) in weights.chunks(n.max(1)).enumerate() {
            for (q, theta) in rotations.iter().enumerate() {
                circuit.push(Gate::Ry(q, *theta));
            }
            if layer < self.reps {
                for q in 0..n.saturating_sub(1) {
                    circuit.push(Gate::Cx(q, q + 1));
                }
            }
        }

        circuit
    }
}
