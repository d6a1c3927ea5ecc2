pub mod context;
pub mod pipeline;

pub use context::{ContextSummary, ScoringContext};
pub use pipeline::ScoringPipeline;
