mod common;

use common::create_test_dir;
use qsignal::application::bootstrap::ModelsBootstrap;
use qsignal::application::ml::confidence::UniformConfidence;
use qsignal::application::scoring::ScoringPipeline;
use qsignal::config::{ArtifactConfig, CircuitConfig, DatasetConfig, ScoringConfig};
use qsignal::domain::errors::{ScalerError, StartupError};
use qsignal::domain::types::Signal;
use qsignal::infrastructure::{CsvDatasetLoader, FileArtifactStore};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn svm_model(width: usize) -> Value {
    json!({
        "kernel": { "type": "rbf", "gamma": 0.5 },
        "support_vectors": [vec![0.2; width], vec![0.8; width]],
        "dual_coef": [-1.0, 1.0],
        "intercept": 0.05,
        "prob_a": -2.5,
        "prob_b": 0.1
    })
}

fn write_artifacts(dir: &Path) {
    write(dir, "selected_features.json", &json!(["High", "Low"]));
    write(
        dir,
        "feature_scaler.json",
        &json!({ "kind": "min_max", "data_min": [80.0, 78.0], "data_max": [90.0, 86.0] }),
    );
    write(dir, "svm_model.json", &svm_model(2));
    write(
        dir,
        "vqc_weights.json",
        &json!([0.1, -0.4, 0.9, 1.3, -0.7, 0.25, 0.6, -1.1]),
    );
}

const PRICES: &str = "\
Price,Close,High,Low,Open,Volume,target
Ticker,AAPL,AAPL,AAPL,AAPL,AAPL,
Date,,,,,,
2024-01-02,185.64,88.44,83.89,87.15,82488700,1
2024-01-03,184.25,85.88,83.43,84.22,58414500,0
2024-01-04,181.91,82.76,80.93,82.15,71983600,1
2024-01-05,181.18,82.86,80.94,81.79,62303300,0
2024-01-08,185.56,85.00,81.50,82.10,59144500,1
";

#[test]
fn test_artifacts_to_predictions() {
    let dir = create_test_dir("bootstrap_e2e");
    write_artifacts(&dir);
    fs::write(dir.join("dataset.csv"), PRICES).unwrap();

    let store = FileArtifactStore::new(ArtifactConfig::in_dir(&dir));
    let context = ModelsBootstrap::init(&store, &CircuitConfig::default()).unwrap();

    let summary = context.summary();
    assert_eq!(summary.features, vec!["High", "Low"]);
    assert_eq!(summary.scaler, "min_max");
    assert!(summary.svm.contains("SVM (rbf)"), "{}", summary.svm);
    assert!(summary.vqc.contains("2 qubits"), "{}", summary.vqc);

    let scoring = ScoringConfig {
        confidence_seed: Some(11),
        ..ScoringConfig::default()
    };
    let loader = CsvDatasetLoader::new(DatasetConfig {
        path: dir.join("dataset.csv"),
        ..DatasetConfig::default()
    });
    let pipeline = ScoringPipeline::new(context, scoring.clone());
    let response =
        pipeline.predict_recent(&loader, &mut UniformConfidence::from_config(&scoring));
    let results = response.predictions().expect("predictions");

    assert_eq!(results.len(), 5);
    let mut correct = 0;
    for r in results {
        assert!(r.vqc_label <= 1 && r.svm_label <= 1);
        assert_eq!(r.signal, Signal::from_label(r.vqc_label));
        let factor = |label: u8| if label == 1 { 1.015 } else { 0.985 };
        assert!((r.vqc_prediction - r.actual * factor(r.vqc_label)).abs() <= 0.005 + 1e-9);
        assert!((r.svm_prediction - r.actual * factor(r.svm_label)).abs() <= 0.005 + 1e-9);
        assert!((0.5..=1.0).contains(&r.svm_confidence));
        assert!((0.85..=0.98).contains(&r.confidence));
        if r.vqc_label == r.target {
            correct += 1;
        }
    }
    let expected = (correct as f64 * 100.0 / 5.0 * 10.0).round() / 10.0;
    assert_eq!(results[4].accuracy, Some(expected));

    // Same seed and artifacts, same answer
    let again =
        pipeline.predict_recent(&loader, &mut UniformConfidence::from_config(&scoring));
    assert_eq!(response, again);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_weight_count_mismatch_fails_startup() {
    let dir = create_test_dir("bootstrap_weights");
    write_artifacts(&dir);
    write(&dir, "vqc_weights.json", &json!([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]));

    let store = FileArtifactStore::new(ArtifactConfig::in_dir(&dir));
    let err = ModelsBootstrap::init(&store, &CircuitConfig::default()).err();
    assert!(matches!(err, Some(StartupError::DimensionMismatch { .. })));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_svm_width_mismatch_fails_startup() {
    let dir = create_test_dir("bootstrap_svm");
    write_artifacts(&dir);
    write(&dir, "svm_model.json", &svm_model(3));

    let store = FileArtifactStore::new(ArtifactConfig::in_dir(&dir));
    match ModelsBootstrap::init(&store, &CircuitConfig::default()) {
        Err(StartupError::DimensionMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 3);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("startup should fail"),
    }

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_scaler_length_mismatch_fails_startup() {
    let dir = create_test_dir("bootstrap_scaler");
    write_artifacts(&dir);
    write(
        &dir,
        "feature_scaler.json",
        &json!({ "kind": "min_max", "data_min": [0.0, 0.0, 0.0], "data_max": [1.0, 1.0, 1.0] }),
    );

    let store = FileArtifactStore::new(ArtifactConfig::in_dir(&dir));
    let err = ModelsBootstrap::init(&store, &CircuitConfig::default()).err();
    assert!(matches!(
        err,
        Some(StartupError::Scaler(ScalerError::LengthMismatch { .. }))
    ));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_artifact_fails_startup() {
    let dir = create_test_dir("bootstrap_missing");
    write_artifacts(&dir);
    fs::remove_file(dir.join("svm_model.json")).unwrap();

    let store = FileArtifactStore::new(ArtifactConfig::in_dir(&dir));
    let err = ModelsBootstrap::init(&store, &CircuitConfig::default()).err();
    match err {
        Some(StartupError::ArtifactMissing { path }) => {
            assert_eq!(path, dir.join("svm_model.json"))
        }
        Some(other) => panic!("unexpected error: {}", other),
        None => panic!("startup should fail"),
    }

    fs::remove_dir_all(dir).ok();
}
