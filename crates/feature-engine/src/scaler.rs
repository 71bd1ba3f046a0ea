//! Frozen Continuous-Feature Scaler

use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialized form of the scaler artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerSpec {
    /// Standardization: `(x - mean) / scale`
    Standard {
        columns: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    /// Min-max: `x * scale + min`
    MinMax {
        columns: Vec<String>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

/// Per-column affine transform with training-time statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnTransform {
    Standard { mean: f64, scale: f64 },
    MinMax { min: f64, scale: f64 },
}

impl ColumnTransform {
    /// Apply to one value
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            ColumnTransform::Standard { mean, scale } => (x - mean) / scale,
            ColumnTransform::MinMax { min, scale } => x * scale + min,
        }
    }
}

/// Scaler keyed by column name
#[derive(Debug, Clone)]
pub struct ContinuousScaler {
    transforms: HashMap<String, ColumnTransform>,
}

impl ContinuousScaler {
    /// Build a scaler from its artifact
    pub fn new(spec: ScalerSpec) -> Result<Self, FeatureError> {
        let (columns, transforms): (Vec<String>, Vec<ColumnTransform>) = match spec {
            ScalerSpec::Standard { columns, mean, scale } => {
                check_lengths(&columns, mean.len(), scale.len())?;
                let transforms = mean
                    .into_iter()
                    .zip(scale)
                    .map(|(mean, scale)| ColumnTransform::Standard {
                        mean,
                        // Constant training columns carry a zero scale; leave them unscaled
                        scale: if scale == 0.0 { 1.0 } else { scale },
                    })
                    .collect();
                (columns, transforms)
            }
            ScalerSpec::MinMax { columns, min, scale } => {
                check_lengths(&columns, min.len(), scale.len())?;
                let transforms = min
                    .into_iter()
                    .zip(scale)
                    .map(|(min, scale)| ColumnTransform::MinMax { min, scale })
                    .collect();
                (columns, transforms)
            }
        };

        let mut map = HashMap::with_capacity(columns.len());
        for (column, transform) in columns.into_iter().zip(transforms) {
            if !transform_is_finite(&transform) {
                return Err(FeatureError::InvalidArtifact(format!(
                    "scaler statistics for {} are not finite",
                    column
                )));
            }
            if map.insert(column.clone(), transform).is_some() {
                return Err(FeatureError::InvalidArtifact(format!(
                    "scaler lists column {} twice",
                    column
                )));
            }
        }

        Ok(Self { transforms: map })
    }

    /// Transform for a column, if the scaler was fit on it
    pub fn transform_for(&self, column: &str) -> Option<ColumnTransform> {
        self.transforms.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

fn check_lengths(columns: &[String], a: usize, b: usize) -> Result<(), FeatureError> {
    if columns.len() != a || columns.len() != b {
        return Err(FeatureError::InvalidArtifact(format!(
            "scaler has {} columns but {} and {} statistics",
            columns.len(),
            a,
            b
        )));
    }
    Ok(())
}

fn transform_is_finite(transform: &ColumnTransform) -> bool {
    match *transform {
        ColumnTransform::Standard { mean, scale } => mean.is_finite() && scale.is_finite(),
        ColumnTransform::MinMax { min, scale } => min.is_finite() && scale.is_finite(),
    }
}
