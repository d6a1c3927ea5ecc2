pub mod artifact_store;
pub mod csv_dataset;
pub mod mock;

pub use artifact_store::FileArtifactStore;
pub use csv_dataset::CsvDatasetLoader;
pub use mock::{InMemoryArtifactStore, InMemoryDatasetLoader};
