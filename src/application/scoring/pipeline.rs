use crate::application::scoring::context::ScoringContext;
use crate::config::ScoringConfig;
use crate::domain::errors::ScoringError;
use crate::domain::ports::{ConfidenceSource, DatasetLoader};
use crate::domain::types::{PredictionResponse, PredictionResult, Record, Signal};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Scores the most recent records of a dataset with both models.
///
/// One synchronous pass per call. A failure on any record aborts the whole batch, so a
/// caller either gets every result or a single error.
pub struct ScoringPipeline {
    context: Arc<ScoringContext>,
    config: ScoringConfig,
}

impl ScoringPipeline {
    pub fn new(context: Arc<ScoringContext>, config: ScoringConfig) -> Self {
        Self { context, config }
    }

    pub fn context(&self) -> &ScoringContext {
        &self.context
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Loads the dataset and scores its tail, folding any failure into an error payload.
    pub fn predict_recent(
        &self,
        loader: &dyn DatasetLoader,
        confidence: &mut dyn ConfidenceSource,
    ) -> PredictionResponse {
        match self.run(loader, confidence) {
            Ok(results) => PredictionResponse::Predictions(results),
            Err(e) => {
                if e.is_data_error() {
                    warn!("Scoring aborted for {}: {}", loader.source(), e);
                } else {
                    error!("Scoring aborted for {}: {}", loader.source(), e);
                }
                PredictionResponse::error(e.to_string())
            }
        }
    }

    pub fn run(
        &self,
        loader: &dyn DatasetLoader,
        confidence: &mut dyn ConfidenceSource,
    ) -> Result<Vec<PredictionResult>, ScoringError> {
        let dataset = loader.load()?;
        self.context.preprocessor().ensure_columns(&dataset.columns)?;
        self.score(dataset.records, confidence)
    }

    /// Scores the last `window` records by date. Input order does not matter.
    pub fn score(
        &self,
        mut records: Vec<Record>,
        confidence: &mut dyn ConfidenceSource,
    ) -> Result<Vec<PredictionResult>, ScoringError> {
        records.sort_by_key(|r| r.date);
        let start = records.len().saturating_sub(self.config.window);
        let recent = &records[start..];

        let preprocessor = self.context.preprocessor();
        let ensemble = self.context.ensemble();

        let mut results = Vec::with_capacity(recent.len());
        let mut correct = 0usize;

        for record in recent {
            let scaled = preprocessor.transform(record)?;
            let output = ensemble
                .evaluate(&scaled)
                .map_err(|source| ScoringError::Model {
                    date: record.date,
                    source,
                })?;

            if output.vqc_label == record.target {
                correct += 1;
            }

            let result = PredictionResult {
                date: record.date,
                actual: record.close,
                vqc_prediction: round_dp(self.simulate_price(record.close, output.vqc_label), 2),
                svm_prediction: round_dp(self.simulate_price(record.close, output.svm_label), 2),
                confidence: round_dp(confidence.next_confidence(), 2),
                svm_confidence: round_dp(output.svm_confidence, 2),
                signal: Signal::from_label(output.vqc_label),
                vqc_label: output.vqc_label,
                svm_label: output.svm_label,
                target: record.target,
                accuracy: None,
            };
            debug!(
                "{}: vqc={} svm={} target={} signal={}",
                result.date, result.vqc_label, result.svm_label, result.target, result.signal
            );
            results.push(result);
        }

        let total = results.len();
        if let Some(last) = results.last_mut() {
            let accuracy = round_dp(correct as f64 * 100.0 / total as f64, 1);
            last.accuracy = Some(accuracy);
            info!(
                "Scored {} records ({} correct, accuracy {}%)",
                total, correct, accuracy
            );
        } else {
            info!("No records to score");
        }

        Ok(results)
    }

    /// Close nudged up for the positive label, down otherwise.
    pub fn simulate_price(&self, close: f64, label: u8) -> f64 {
        simulate_price(
            close,
            label,
            self.config.price_up_factor,
            self.config.price_down_factor,
        )
    }
}

pub fn simulate_price(close: f64, label: u8, up_factor: f64, down_factor: f64) -> f64 {
    if label == 1 {
        close * up_factor
    } else {
        close * down_factor
    }
}

/// Rounds half-to-even on the exact stored value of the float, so `2.675` (stored just
/// below) gives `2.67`. Values Decimal cannot hold are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(dp))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
