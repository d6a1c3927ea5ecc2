use super::statevector::Statevector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    H(usize),
    P(usize, f64),
    Ry(usize, f64),
    Cx(usize, usize),
}

/// Gate list with every parameter already bound.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumCircuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl QuantumCircuit {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Appends `other` after this circuit's gates.
    pub fn compose(mut self, other: &QuantumCircuit) -> Self {
        self.num_qubits = self.num_qubits.max(other.num_qubits);
        self.gates.extend_from_slice(&other.gates);
        self
    }

    pub fn apply(&self, state: &mut Statevector) {
        for gate in &self.gates {
            match *gate {
                Gate::H(q) => state.h(q),
                Gate::P(q, theta) => state.p(q, theta),
                Gate::Ry(q, theta) => state.ry(q, theta),
                Gate::Cx(c, t) => state.cx(c, t),
            }
        }
    }

    /// Runs the circuit from |0...0> and returns the basis-state probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        let mut state = Statevector::zero(self.num_qubits);
        self.apply(&mut state);
        state.probabilities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_keeps_order() {
        let mut a = QuantumCircuit::new(2);
        a.push(Gate::H(0));
        let mut b = QuantumCircuit::new(2);
        b.push(Gate::Cx(0, 1));

        let bell = a.compose(&b);
        assert_eq!(bell.gates(), &[Gate::H(0), Gate::Cx(0, 1)]);

        let probs = bell.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[3] - 0.5).abs() < 1e-12);
    }
}
