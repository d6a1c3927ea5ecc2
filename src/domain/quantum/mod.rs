//! Exact statevector simulation of the circuits used by the variational classifier.

pub mod ansatz;
pub mod circuit;
pub mod feature_map;
pub mod statevector;

pub use ansatz::RealAmplitudes;
pub use circuit::{Gate, QuantumCircuit};
pub use feature_map::ZZFeatureMap;
pub use statevector::Statevector;

/// Largest register simulated (2^20 amplitudes).
pub const MAX_QUBITS: usize = 20;
