//! Feature Engineering Engine
//!
//! Reproduces the training-time feature space at inference time:
//! derive, one-hot encode, align onto the selected features, scale the
//! continuous columns.

mod align;
mod encoder;
mod pipeline;
mod scaler;
mod vector;

pub use align::Aligner;
pub use encoder::{CategoricalSpec, DropPolicy, EncoderSpec, HandleUnknown, OneHotEncoder};
pub use pipeline::FeaturePipeline;
pub use scaler::{ColumnTransform, ContinuousScaler, ScalerSpec};
pub use vector::{FeatureMatrix, FeatureVector};

use record_schema::ValidationError;
use thiserror::Error;

/// Errors during feature transformation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    #[error("Column {0} is required by the encoder but missing from the record")]
    MissingColumn(String),
    #[error("Column {column} expected a {expected} value")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
    #[error("Unknown category {value:?} for column {column}")]
    UnknownCategory { column: String, value: String },
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
    #[error("Scaler has no statistics for continuous column {0}")]
    ScalerColumnMissing(String),
    #[error("Encoded columns do not match the alignment plan")]
    ColumnMismatch,
    #[error("Non-finite value in column {column}")]
    NonFinite { column: String },
    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        source: Box<FeatureError>,
    },
    #[error("Shape error: {0}")]
    Shape(String),
}

impl FeatureError {
    /// Whether the failure is attributable to the caller's input
    pub fn is_invalid_input(&self) -> bool {
        match self {
            FeatureError::InvalidInput(_) | FeatureError::UnknownCategory { .. } => true,
            FeatureError::Row { source, .. } => source.is_invalid_input(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod test_support;
