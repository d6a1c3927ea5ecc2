pub mod confidence;
pub mod ensemble;
pub mod preprocessor;
pub mod svm_classifier;
pub mod vqc_classifier;
