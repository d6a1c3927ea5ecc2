// Domain-specific error types
pub mod errors;

// Feature selection, scaler and SVM artifact models
pub mod ml;

// Port interfaces
pub mod ports;

// Statevector simulation of the VQC circuits
pub mod quantum;

// Records, feature vectors and scoring results
pub mod types;
