use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense statevector over `num_qubits` qubits.
///
/// Basis index bit `q` is the state of qubit `q` (qubit 0 is the least significant bit).
#[derive(Debug, Clone)]
pub struct Statevector {
    num_qubits: usize,
    amplitudes: Array1<Complex64>,
}

impl Statevector {
    /// |0...0>
    pub fn zero(num_qubits: usize) -> Self {
        let mut amplitudes = Array1::from_elem(1usize << num_qubits, Complex64::new(0.0, 0.0));
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Hadamard
    pub fn h(&mut self, qubit: usize) {
        let mask = 1usize << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = (a + b) * FRAC_1_SQRT_2;
                self.amplitudes[j] = (a - b) * FRAC_1_SQRT_2;
            }
        }
    }

    /// Phase gate diag(1, e^{i*theta})
    pub fn p(&mut self, qubit: usize, theta: f64) {
        let mask = 1usize << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    /// Y rotation [[cos t/2, -sin t/2], [sin t/2, cos t/2]]
    pub fn ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1usize << qubit;
        let (sin, cos) = (theta / 2.0).sin_cos();
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = a * cos - b * sin;
                self.amplitudes[j] = a * sin + b * cos;
            }
        }
    }

    /// Controlled-X
    pub fn cx(&mut self, control: usize, target: usize) {
        let c_mask = 1usize << control;
        let t_mask = 1usize << target;
        for i in 0..self.dim() {
            if i & c_mask != 0 && i & t_mask == 0 {
                self.amplitudes.swap(i, i | t_mask);
            }
        }
    }

    /// Measurement probability of every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }
}
