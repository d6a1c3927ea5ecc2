use crate::domain::errors::StartupError;
use crate::domain::types::{FeatureVector, Record};
use std::collections::HashSet;

/// Ordered list of selected feature names.
/// This order MUST match the column order the scaler and both models were fitted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRegistry {
    names: Vec<String>,
}

impl FeatureRegistry {
    pub fn new(names: Vec<String>) -> Result<Self, StartupError> {
        if names.is_empty() {
            return Err(StartupError::InvalidArtifact {
                artifact: "selected features",
                reason: "feature list is empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(StartupError::InvalidArtifact {
                    artifact: "selected features",
                    reason: "feature list contains a blank name".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(StartupError::InvalidArtifact {
                    artifact: "selected features",
                    reason: format!("duplicate feature '{}'", name),
                });
            }
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Selected names absent from `columns`, in selection order.
    pub fn missing_from(&self, columns: &[String]) -> Vec<String> {
        let available: HashSet<&str> = columns.iter().map(String::as_str).collect();
        self.names
            .iter()
            .filter(|n| !available.contains(n.as_str()))
            .cloned()
            .collect()
    }

    /// Pulls the selected values out of a record. Returns the missing names on failure.
    pub fn select(&self, record: &Record) -> Result<FeatureVector, Vec<String>> {
        let mut values = Vec::with_capacity(self.names.len());
        let mut missing = Vec::new();

        for name in &self.names {
            match record.value(name) {
                Some(v) => values.push(v),
                None => missing.push(name.clone()),
            }
        }

        if missing.is_empty() {
            Ok(FeatureVector::new(values))
        } else {
            Err(missing)
        }
    }
}
