mod common;

use common::{FixedConfidence, create_test_dir, stub_context};
use qsignal::application::scoring::ScoringPipeline;
use qsignal::config::{DatasetConfig, ScoringConfig};
use qsignal::domain::errors::ScoringError;
use qsignal::domain::ports::DatasetLoader;
use qsignal::domain::types::Signal;
use qsignal::infrastructure::CsvDatasetLoader;
use std::fs;

const PRICES: &str = "\
Price,Close,High,Low,Open,Volume,target
Ticker,AAPL,AAPL,AAPL,AAPL,AAPL,
Date,,,,,,
2024-01-02,185.64,88.44,83.89,87.15,82488700,1
2024-01-03,184.25,85.88,83.43,84.22,58414500,0
2024-01-04,181.91,82.76,80.93,82.15,71983600,1
";

fn loader_for(content: &str, label: &str) -> (CsvDatasetLoader, std::path::PathBuf) {
    let dir = create_test_dir(label);
    let path = dir.join("dataset.csv");
    fs::write(&path, content).unwrap();
    let config = DatasetConfig {
        path,
        ..DatasetConfig::default()
    };
    (CsvDatasetLoader::new(config), dir)
}

#[test]
fn test_csv_end_to_end_with_stub_models() {
    let (loader, dir) = loader_for(PRICES, "csv_e2e");
    let pipeline = ScoringPipeline::new(stub_context(0, 1), ScoringConfig::default());

    let response = pipeline.predict_recent(&loader, &mut FixedConfidence(0.93));
    let results = response.predictions().expect("predictions");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].date.to_string(), "2024-01-02");
    assert_eq!(results[2].actual, 181.91);
    assert!(results.iter().all(|r| r.signal == Signal::Buy));
    assert_eq!(results[2].accuracy, Some(66.7));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json[0]["date"], "2024-01-02");
    assert_eq!(json[0]["signal"], "BUY");
    assert!(json[0].get("accuracy").is_none());
    assert_eq!(json[2]["accuracy"], 66.7);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_file_payload_names_path() {
    let dir = create_test_dir("csv_missing");
    let path = dir.join("absent.csv");
    let loader = CsvDatasetLoader::new(DatasetConfig {
        path: path.clone(),
        ..DatasetConfig::default()
    });
    let pipeline = ScoringPipeline::new(stub_context(1, 1), ScoringConfig::default());

    let response = pipeline.predict_recent(&loader, &mut FixedConfidence(0.9));

    assert!(response.predictions().is_none());
    let message = response.error_message().unwrap();
    assert_eq!(message, format!("Data file not found at {}", path.display()));
    assert!(matches!(
        loader.load(),
        Err(ScoringError::DataSourceMissing { .. })
    ));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_wrong_column_count_gives_no_partial_list() {
    let content = format!("{}2024-01-05,180.00,81.2\n", PRICES);
    let (loader, dir) = loader_for(&content, "csv_columns");
    let pipeline = ScoringPipeline::new(stub_context(1, 1), ScoringConfig::default());

    let response = pipeline.predict_recent(&loader, &mut FixedConfidence(0.9));

    assert!(response.is_error());
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.is_object());
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to process CSV file:")
    );

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_custom_skip_rows_and_date_column() {
    let content = "\
When,Close,High,Low,target
2024-02-01,10.5,1.0,0.5,1
2024-02-02,11.0,1.5,0.7,0
";
    let dir = create_test_dir("csv_layout");
    let path = dir.join("plain.csv");
    fs::write(&path, content).unwrap();
    let loader = CsvDatasetLoader::new(DatasetConfig {
        path,
        skip_rows: 1,
        date_source_column: "When".to_string(),
    });

    let dataset = loader.load().unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.columns[0], "Date");
    assert_eq!(dataset.records[1].close, 11.0);
    assert_eq!(dataset.records[1].value("Low"), Some(0.7));

    fs::remove_dir_all(dir).ok();
}
