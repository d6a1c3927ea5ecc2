//! Fitted feature scalers.
//!
//! Parameters are learned when the models are built and only ever applied here.
//! The transform is affine; values outside the fitted range pass through unclipped
//! unless the artifact asks for clipping.

use crate::domain::errors::ScalerError;
use serde::{Deserialize, Serialize};

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Min-max scaler: maps `[data_min, data_max]` onto `feature_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
    #[serde(default)]
    pub clip: bool,
}

impl MinMaxScaler {
    pub fn new(data_min: Vec<f64>, data_max: Vec<f64>) -> Self {
        Self {
            data_min,
            data_max,
            feature_range: default_feature_range(),
            clip: false,
        }
    }

    fn transform_value(&self, index: usize, raw: f64) -> f64 {
        let min = self.data_min[index];
        let mut range = self.data_max[index] - min;
        // Constant feature: keep the unit range so the value maps onto `low`
        if range == 0.0 {
            range = 1.0;
        }
        let (low, high) = self.feature_range;
        let unit = (raw - min) / range;
        let scaled = if low == 0.0 && high == 1.0 {
            unit
        } else {
            low + unit * (high - low)
        };

        if self.clip {
            scaled.clamp(low, high)
        } else {
            scaled
        }
    }
}

/// Standard scaler: `(raw - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    MinMax(MinMaxScaler),
    Standard(StandardScaler),
}

impl FeatureScaler {
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureScaler::MinMax(_) => "min_max",
            FeatureScaler::Standard(_) => "standard",
        }
    }

    pub fn num_features(&self) -> usize {
        match self {
            FeatureScaler::MinMax(s) => s.data_min.len(),
            FeatureScaler::Standard(s) => s.mean.len(),
        }
    }

    /// Checks the parameters are usable for `expected` features.
    pub fn validate(&self, expected: usize) -> Result<(), ScalerError> {
        match self {
            FeatureScaler::MinMax(s) => {
                check_len("data_min", &s.data_min, expected)?;
                check_len("data_max", &s.data_max, expected)?;
                check_finite("data_min", &s.data_min)?;
                check_finite("data_max", &s.data_max)?;

                let (low, high) = s.feature_range;
                if !low.is_finite() || !high.is_finite() || low >= high {
                    return Err(ScalerError::InvalidFeatureRange { low, high });
                }

                for (index, (min, max)) in s.data_min.iter().zip(&s.data_max).enumerate() {
                    if min > max {
                        return Err(ScalerError::InvertedRange {
                            index,
                            min: *min,
                            max: *max,
                        });
                    }
                }
                Ok(())
            }
            FeatureScaler::Standard(s) => {
                check_len("mean", &s.mean, expected)?;
                check_len("scale", &s.scale, expected)?;
                check_finite("mean", &s.mean)?;
                check_finite("scale", &s.scale)?;

                if let Some(index) = s.scale.iter().position(|v| *v == 0.0) {
                    return Err(ScalerError::ZeroScale { index });
                }
                Ok(())
            }
        }
    }

    /// Applies the fitted transform. `raw` must have `num_features()` values.
    pub fn transform(&self, raw: &[f64]) -> Vec<f64> {
        match self {
            FeatureScaler::MinMax(s) => raw
                .iter()
                .enumerate()
                .map(|(i, v)| s.transform_value(i, *v))
                .collect(),
            FeatureScaler::Standard(s) => raw
                .iter()
                .zip(s.mean.iter().zip(&s.scale))
                .map(|(v, (mean, scale))| (v - mean) / scale)
                .collect(),
        }
    }
}

fn check_len(name: &'static str, values: &[f64], expected: usize) -> Result<(), ScalerError> {
    if values.len() != expected {
        return Err(ScalerError::LengthMismatch {
            name,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

fn check_finite(name: &'static str, values: &[f64]) -> Result<(), ScalerError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ScalerError::NonFinite { name, index }),
        None => Ok(()),
    }
}
