use crate::domain::errors::{ScoringError, StartupError};
use crate::domain::ml::feature_registry::FeatureRegistry;
use crate::domain::ml::feature_scaler::FeatureScaler;
use crate::domain::types::{FeatureVector, Record, ScaledFeatureVector};

/// Selects the fitted feature columns from a record and applies the fitted scaler.
///
/// Built once at startup; never refits.
#[derive(Debug, Clone)]
pub struct FeaturePreprocessor {
    registry: FeatureRegistry,
    scaler: FeatureScaler,
}

impl FeaturePreprocessor {
    pub fn new(registry: FeatureRegistry, scaler: FeatureScaler) -> Result<Self, StartupError> {
        scaler.validate(registry.len())?;
        Ok(Self { registry, scaler })
    }

    pub fn feature_names(&self) -> &[String] {
        self.registry.names()
    }

    pub fn num_features(&self) -> usize {
        self.registry.len()
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    /// Fails when the dataset header lacks any selected feature.
    pub fn ensure_columns(&self, columns: &[String]) -> Result<(), ScoringError> {
        let missing = self.registry.missing_from(columns);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScoringError::MissingColumns(missing))
        }
    }

    pub fn select(&self, record: &Record) -> Result<FeatureVector, ScoringError> {
        self.registry
            .select(record)
            .map_err(ScoringError::MissingColumns)
    }

    pub fn transform(&self, record: &Record) -> Result<ScaledFeatureVector, ScoringError> {
        let raw = self.select(record)?;
        Ok(self.scale(&raw))
    }

    pub fn scale(&self, raw: &FeatureVector) -> ScaledFeatureVector {
        ScaledFeatureVector::new(self.scaler.transform(raw.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::feature_scaler::MinMaxScaler;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn preprocessor() -> FeaturePreprocessor {
        let registry =
            FeatureRegistry::new(vec!["Volume".to_string(), "High".to_string()]).unwrap();
        let scaler = FeatureScaler::MinMax(MinMaxScaler::new(
            vec![1_000.0, 50.0],
            vec![9_000.0, 150.0],
        ));
        FeaturePreprocessor::new(registry, scaler).unwrap()
    }

    fn record(volume: f64, high: f64) -> Record {
        let values = HashMap::from([
            ("Volume".to_string(), volume),
            ("High".to_string(), high),
            ("Close".to_string(), 99.0),
        ]);
        Record::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), 99.0, 0, values)
    }

    #[test]
    fn test_transform_boundaries() {
        let p = preprocessor();
        assert_eq!(
            p.transform(&record(1_000.0, 50.0)).unwrap().as_slice(),
            &[0.0, 0.0]
        );
        assert_eq!(
            p.transform(&record(9_000.0, 150.0)).unwrap().as_slice(),
            &[1.0, 1.0]
        );
        assert_eq!(
            p.transform(&record(5_000.0, 100.0)).unwrap().as_slice(),
            &[0.5, 0.5]
        );
    }

    #[test]
    fn test_scaler_width_must_match_features() {
        let registry = FeatureRegistry::new(vec!["High".to_string()]).unwrap();
        let scaler = FeatureScaler::MinMax(MinMaxScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]));
        assert!(matches!(
            FeaturePreprocessor::new(registry, scaler),
            Err(StartupError::Scaler(_))
        ));
    }

    #[test]
    fn test_ensure_columns() {
        let p = preprocessor();
        let header = vec!["Date".to_string(), "Close".to_string(), "High".to_string()];
        match p.ensure_columns(&header) {
            Err(ScoringError::MissingColumns(missing)) => assert_eq!(missing, vec!["Volume"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
