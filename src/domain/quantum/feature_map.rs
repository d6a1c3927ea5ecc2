use super::circuit::{Gate, QuantumCircuit};
use std::f64::consts::PI;

/// Second-order Pauli-Z evolution feature map with linear entanglement.
///
/// Each repetition applies H to every qubit, `P(2 * x_i)` to qubit `i`, then for every
/// neighbour pair `(i, i + 1)` the ZZ evolution `CX(i, i+1) P(2 * (pi - x_i)(pi - x_j)) CX(i, i+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZZFeatureMap {
    pub feature_dimension: usize,
    pub reps: usize,
}

impl ZZFeatureMap {
    pub fn new(feature_dimension: usize, reps: usize) -> Self {
        Self {
            feature_dimension,
            reps,
        }
    }

    /// Binds `x` (one value per qubit) into a concrete circuit.
    pub fn bind(&self, x: &[f64]) -> QuantumCircuit {
        debug_assert_eq!(x.len(), self.feature_dimension);
        let n = self.feature_dimension;
        let mut circuit = QuantumCircuit::new(n);

        for _ in 0..self.reps {
            for q in 0..n {
                circuit.push(Gate::H(q));
            }
            for (q, value) in x.iter().enumerate() {
                circuit.push(Gate::P(q, 2.0 * value));
            }
            for q in 0..n.saturating_sub(1) {
                let angle = 2.0 * (PI - x[q]) * (PI - x[q + 1]);
                circuit.push(Gate::Cx(q, q + 1));
                circuit.push(Gate::P(q + 1, angle));
                circuit.push(Gate::Cx(q, q + 1));
            }
        }

        circuit
    }
}
