pub mod feature_registry;
pub mod feature_scaler;
pub mod svm_model;
