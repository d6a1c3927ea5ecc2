use crate::domain::errors::{ModelError, ScoringError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
}

impl Signal {
    /// BUY for the positive class, SELL for everything else.
    pub fn from_label(label: u8) -> Self {
        if label == 1 { Signal::Buy } else { Signal::Sell }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
        }
    }
}

/// One row of the price dataset.
///
/// `values` holds every numeric column by name (Close and target included),
/// so feature selection never has to know which columns are special.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub close: f64,
    pub target: u8,
    values: HashMap<String, f64>,
}

impl Record {
    pub fn new(date: NaiveDate, close: f64, target: u8, values: HashMap<String, f64>) -> Self {
        Self {
            date,
            close,
            target,
            values,
        }
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }
}

/// Records read from a dataset plus the column names found in its header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Raw values of the selected features, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Feature values after the fitted scaling transform. Only this type reaches the models.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFeatureVector(Vec<f64>);

impl ScaledFeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejects vectors a model cannot score: wrong width or NaN/infinite entries.
    pub fn check_input(&self, model: &str, expected: usize) -> Result<(), ModelError> {
        if self.0.len() != expected {
            return Err(ModelError::DimensionMismatch {
                model: model.to_string(),
                expected,
                actual: self.0.len(),
            });
        }
        if let Some(index) = self.0.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteInput {
                model: model.to_string(),
                index,
            });
        }
        Ok(())
    }
}

/// Scored output for one record.
///
/// `vqc_prediction` and `svm_prediction` are simulated prices (close nudged up or down
/// by a fixed factor depending on the label), not forecasts. `confidence` is the
/// placeholder band value, not a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub date: NaiveDate,
    pub actual: f64,
    pub vqc_prediction: f64,
    pub svm_prediction: f64,
    pub confidence: f64,
    pub svm_confidence: f64,
    pub signal: Signal,
    pub vqc_label: u8,
    pub svm_label: u8,
    pub target: u8,
    /// Only set on the last result of a batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// What a caller gets back from one scoring run: the full list, or one error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Predictions(Vec<PredictionResult>),
    Error { error: String },
}

impl PredictionResponse {
    pub fn error(message: impl Into<String>) -> Self {
        PredictionResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PredictionResponse::Error { .. })
    }

    pub fn predictions(&self) -> Option<&[PredictionResult]> {
        match self {
            PredictionResponse::Predictions(list) => Some(list),
            PredictionResponse::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PredictionResponse::Predictions(_) => None,
            PredictionResponse::Error { error } => Some(error),
        }
    }
}

impl From<Result<Vec<PredictionResult>, ScoringError>> for PredictionResponse {
    fn from(result: Result<Vec<PredictionResult>, ScoringError>) -> Self {
        match result {
            Ok(list) => PredictionResponse::Predictions(list),
            Err(e) => PredictionResponse::error(e.to_string()),
        }
    }
}
