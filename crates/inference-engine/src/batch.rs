//! Batch Scoring
//!
//! Scores a whole table in one pass through the pipeline. The batch either
//! fully succeeds or fails with the index of the first bad row.

use crate::decision::AttritionLabel;
use crate::engine::AttritionPredictor;
use crate::InferenceError;
use ndarray::Array1;
use record_schema::EmployeeRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One output row of the batch table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    #[serde(rename = "Attrition_Probability")]
    pub attrition_probability: f64,
    /// 1 = will leave, 0 = will stay
    #[serde(rename = "Predicted_Attrition")]
    pub predicted_attrition: u8,
}

/// Probabilities and labels for a batch, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchScores {
    probabilities: Array1<f64>,
    predictions: Array1<u8>,
}

impl BatchScores {
    pub fn probabilities(&self) -> &Array1<f64> {
        &self.probabilities
    }

    pub fn predictions(&self) -> &Array1<u8> {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Number of rows predicted to leave
    pub fn positive_count(&self) -> usize {
        self.predictions.iter().filter(|&&p| p == 1).count()
    }

    /// `count(predicted = 1) / total * 100`; `None` for an empty batch
    pub fn attrition_rate(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.positive_count() as f64 / self.len() as f64 * 100.0)
    }

    /// Output rows in input order
    pub fn rows(&self) -> impl Iterator<Item = BatchRow> + '_ {
        self.probabilities
            .iter()
            .zip(self.predictions.iter())
            .map(|(&attrition_probability, &predicted_attrition)| BatchRow {
                attrition_probability,
                predicted_attrition,
            })
    }
}

impl AttritionPredictor {
    /// Score a table of records
    pub fn score_batch(&self, records: &[EmployeeRecord]) -> Result<BatchScores, InferenceError> {
        for (row, record) in records.iter().enumerate() {
            self.validator
                .validate(record)
                .map_err(|source| InferenceError::InvalidRow {
                    row,
                    source: source.into(),
                })?;
        }

        let matrix = self.pipeline.transform_batch(records)?;

        let mut probabilities = Array1::zeros(matrix.nrows());
        for (row, slot) in probabilities.iter_mut().enumerate() {
            *slot = self.model.predict_proba(matrix.row(row).iter())?;
        }
        let predictions = probabilities.mapv(|p| AttritionLabel::from_probability(p).as_flag());

        let scores = BatchScores {
            probabilities,
            predictions,
        };
        info!(
            "Scored batch of {} records, {} predicted to leave",
            scores.len(),
            scores.positive_count()
        );
        Ok(scores)
    }
}
