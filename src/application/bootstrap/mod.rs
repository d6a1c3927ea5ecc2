pub mod models;

pub use models::ModelsBootstrap;
