#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use qsignal::application::ml::ensemble::ModelEnsemble;
use qsignal::application::ml::preprocessor::FeaturePreprocessor;
use qsignal::application::scoring::ScoringContext;
use qsignal::domain::errors::ModelError;
use qsignal::domain::ml::feature_registry::FeatureRegistry;
use qsignal::domain::ml::feature_scaler::{FeatureScaler, MinMaxScaler};
use qsignal::domain::ports::{BinaryClassifier, ConfidenceSource};
use qsignal::domain::types::{Record, ScaledFeatureVector};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn create_test_dir(label: &str) -> PathBuf {
    let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "qsignal_test_{}_{}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
        unique_id,
        label
    ));
    std::fs::create_dir_all(&dir).expect("Failed to create test temp dir");
    dir
}

pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
}

pub const FEATURES: [&str; 2] = ["High", "Low"];

/// Record on `day(offset)` whose High/Low both equal `feature`.
pub fn record(offset: u64, close: f64, target: u8, feature: f64) -> Record {
    let mut values = HashMap::new();
    values.insert("Close".to_string(), close);
    values.insert("target".to_string(), target as f64);
    for name in FEATURES {
        values.insert(name.to_string(), feature);
    }
    Record::new(day(offset), close, target, values)
}

pub fn columns() -> Vec<String> {
    ["Date", "Close", "High", "Low", "target"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Classifier that always answers `label`, after the usual input checks.
pub struct StubClassifier {
    pub label: u8,
    pub width: usize,
    pub name: &'static str,
}

impl BinaryClassifier for StubClassifier {
    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<[f64; 2], ModelError> {
        features.check_input(self.name, self.width)?;
        Ok(if self.label == 1 {
            [0.2, 0.8]
        } else {
            [0.9, 0.1]
        })
    }

    fn num_features(&self) -> usize {
        self.width
    }

    fn name(&self) -> &str {
        self.name
    }
}

pub struct FixedConfidence(pub f64);

impl ConfidenceSource for FixedConfidence {
    fn next_confidence(&mut self) -> f64 {
        self.0
    }
}

/// Context over High/Low scaled from [0, 100] with stub models.
pub fn stub_context(svm_label: u8, vqc_label: u8) -> Arc<ScoringContext> {
    let registry =
        FeatureRegistry::new(FEATURES.iter().map(|f| f.to_string()).collect()).unwrap();
    let scaler = FeatureScaler::MinMax(MinMaxScaler::new(vec![0.0, 0.0], vec![100.0, 100.0]));
    let preprocessor = FeaturePreprocessor::new(registry, scaler).unwrap();

    let svm = StubClassifier {
        label: svm_label,
        width: 2,
        name: "svm-stub",
    };
    let vqc = StubClassifier {
        label: vqc_label,
        width: 2,
        name: "vqc-stub",
    };
    let ensemble = ModelEnsemble::new(Box::new(svm), Box::new(vqc), 2).unwrap();
    Arc::new(ScoringContext::new(preprocessor, ensemble).unwrap())
}
