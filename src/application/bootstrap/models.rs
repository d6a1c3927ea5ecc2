use std::sync::Arc;
use tracing::info;

use crate::application::ml::ensemble::ModelEnsemble;
use crate::application::ml::preprocessor::FeaturePreprocessor;
use crate::application::ml::svm_classifier::SupportVectorClassifier;
use crate::application::ml::vqc_classifier::VariationalQuantumClassifier;
use crate::application::scoring::ScoringContext;
use crate::config::CircuitConfig;
use crate::domain::errors::StartupError;
use crate::domain::ml::feature_registry::FeatureRegistry;
use crate::domain::ports::ArtifactStore;

pub struct ModelsBootstrap;

impl ModelsBootstrap {
    /// Loads the four artifacts, cross-checks their dimensions and warms up both models.
    pub fn init(
        store: &dyn ArtifactStore,
        circuit: &CircuitConfig,
    ) -> Result<Arc<ScoringContext>, StartupError> {
        let registry = FeatureRegistry::new(store.load_selected_features()?)?;
        info!(
            "Selected features ({}): {}",
            registry.len(),
            registry.names().join(", ")
        );

        let preprocessor = FeaturePreprocessor::new(registry, store.load_scaler()?)?;
        let num_features = preprocessor.num_features();

        let svm = SupportVectorClassifier::from_model_data(store.load_svm_model()?)?;
        let vqc = VariationalQuantumClassifier::new(
            num_features,
            circuit.feature_map_reps,
            circuit.ansatz_reps,
            store.load_vqc_weights()?,
        )?;

        let ensemble = ModelEnsemble::new(Box::new(svm), Box::new(vqc), num_features)?;
        let context = ScoringContext::new(preprocessor, ensemble)?;
        Ok(Arc::new(context))
    }
}
