// Startup wiring: artifacts to scoring context
pub mod bootstrap;

// Preprocessing and the two classifiers
pub mod ml;

// Batch scoring
pub mod scoring;
