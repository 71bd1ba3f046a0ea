//! Attrition Inference Engine
//!
//! Loads the five frozen training artifacts, scores employee records with
//! the logistic-regression model and maps probabilities to labels and risk
//! bands, online or in batch.

mod artifacts;
mod batch;
mod decision;
mod engine;
mod model;
mod settings;

pub use artifacts::{ArtifactPaths, ArtifactStore};
pub use batch::{BatchRow, BatchScores};
pub use decision::{
    AttritionLabel, RiskLevel, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, PREDICTION_THRESHOLD,
};
pub use engine::{AttritionPredictor, Prediction};
pub use model::{ClassLabel, LogisticModel, ModelError, ModelSpec};
pub use settings::{
    config_path, load_layered, ArtifactConfig, PredictorConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH,
};

use feature_engine::FeatureError;
use record_schema::ValidationError;
use thiserror::Error;

/// Errors during artifact loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to load {artifact} artifact from {path}: {reason}")]
    ArtifactLoad {
        artifact: &'static str,
        path: String,
        reason: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(FeatureError),
    #[error("Invalid input in row {row}: {source}")]
    InvalidRow {
        row: usize,
        source: FeatureError,
    },
    #[error("Pipeline failure: {0}")]
    Pipeline(FeatureError),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Model produced a non-finite probability")]
    NonFiniteProbability,
}

impl InferenceError {
    /// Whether the caller's input is at fault rather than the service
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            InferenceError::InvalidInput(_) | InferenceError::InvalidRow { .. }
        )
    }
}

impl From<ValidationError> for InferenceError {
    fn from(err: ValidationError) -> Self {
        InferenceError::InvalidInput(FeatureError::InvalidInput(err))
    }
}

impl From<FeatureError> for InferenceError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::Row { row, source } if source.is_invalid_input() => {
                InferenceError::InvalidRow { row, source: *source }
            }
            err if err.is_invalid_input() => InferenceError::InvalidInput(err),
            other => InferenceError::Pipeline(other),
        }
    }
}

#[cfg(test)]
mod test_support;
