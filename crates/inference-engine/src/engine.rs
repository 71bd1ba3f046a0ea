//! Attrition Predictor

use crate::artifacts::{ArtifactPaths, ArtifactStore};
use crate::decision::{AttritionLabel, RiskLevel};
use crate::model::LogisticModel;
use crate::InferenceError;
use feature_engine::FeaturePipeline;
use record_schema::{EmployeeRecord, ValidationConfig, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Prediction result for one employee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability of the positive ("will leave") class, in [0, 1]
    pub attrition_probability: f64,
    pub will_leave: AttritionLabel,
    pub risk_level: RiskLevel,
}

impl Prediction {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            attrition_probability: probability,
            will_leave: AttritionLabel::from_probability(probability),
            risk_level: RiskLevel::from_probability(probability),
        }
    }
}

/// Immutable inference context: validator, feature pipeline and model.
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct AttritionPredictor {
    pub(crate) validator: Validator,
    pub(crate) pipeline: FeaturePipeline,
    pub(crate) model: LogisticModel,
}

impl AttritionPredictor {
    /// Load all artifacts from `dir`; any failure is fatal
    pub fn load(
        dir: impl AsRef<Path>,
        paths: &ArtifactPaths,
        validation: ValidationConfig,
    ) -> Result<Self, InferenceError> {
        let store = ArtifactStore::load(dir, paths)?;
        Ok(Self::new(store, validation))
    }

    pub fn new(store: ArtifactStore, validation: ValidationConfig) -> Self {
        Self {
            validator: Validator::new(validation),
            pipeline: store.pipeline,
            model: store.model,
        }
    }

    pub fn pipeline(&self) -> &FeaturePipeline {
        &self.pipeline
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    /// Positive-class probability for one record
    pub fn predict_proba(&self, record: &EmployeeRecord) -> Result<f64, InferenceError> {
        self.validator.validate(record)?;
        let features = self.pipeline.transform(record)?;
        let probability = self.model.predict_proba(features.values())?;
        debug!("Predicted attrition probability {:.4}", probability);
        Ok(probability)
    }

    /// Probability, label and risk band for one record
    pub fn predict(&self, record: &EmployeeRecord) -> Result<Prediction, InferenceError> {
        self.predict_proba(record).map(Prediction::from_probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{edit_artifact, fixture_dir, sample_record, scratch_fixtures};

    const GOLDEN_SAMPLE_PROBABILITY: f64 = 0.5677401359782196;

    fn predictor() -> AttritionPredictor {
        AttritionPredictor::load(fixture_dir(), &ArtifactPaths::default(), ValidationConfig::default())
            .unwrap()
    }

    #[test]
    fn test_golden_sample() {
        let prediction = predictor().predict(&sample_record()).unwrap();
        assert!((prediction.attrition_probability - GOLDEN_SAMPLE_PROBABILITY).abs() < 1e-12);
        assert_eq!(prediction.will_leave, AttritionLabel::Yes);
        assert_eq!(prediction.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_idempotent() {
        let predictor = predictor();
        let record = sample_record();
        let a = predictor.predict_proba(&record).unwrap();
        let b = predictor.predict_proba(&record).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_unknown_department_still_scores() {
        let mut record = sample_record();
        record.department = "Legal".to_string();
        let prediction = predictor().predict(&record).unwrap();
        assert!((prediction.attrition_probability - 0.4164501443410419).abs() < 1e-12);
        assert_eq!(prediction.will_leave, AttritionLabel::No);
        assert_eq!(prediction.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_unknown_category_under_error_policy_is_invalid_input() {
        let scratch = scratch_fixtures();
        edit_artifact(scratch.path(), "encoder.json", |encoder| {
            encoder["handle_unknown"] = "error".into();
        });
        let predictor =
            AttritionPredictor::load(scratch.path(), &ArtifactPaths::default(), ValidationConfig::default())
                .unwrap();

        let mut record = sample_record();
        assert!(predictor.predict(&record).is_ok());
        record.department = "Legal".to_string();
        let err = predictor.predict(&record).unwrap_err();
        assert!(err.is_invalid_input(), "{err}");
        assert!(err.to_string().contains("Department"));

        let batch_err = predictor.score_batch(&[sample_record(), record]).unwrap_err();
        assert!(matches!(batch_err, InferenceError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_non_positive_income_is_invalid_input() {
        let predictor = predictor();
        let mut record = sample_record();
        for income in [0, -100] {
            record.monthly_income = income;
            let err = predictor.predict(&record).unwrap_err();
            assert!(err.is_invalid_input(), "{err}");
        }
    }

    #[test]
    fn test_response_shape() {
        let prediction = Prediction::from_probability(0.82);
        let json = serde_json::to_value(prediction).unwrap();
        assert_eq!(json["attrition_probability"], 0.82);
        assert_eq!(json["will_leave"], "yes");
        assert_eq!(json["risk_level"], "High");
    }

    #[test]
    fn test_shared_across_threads() {
        let predictor = std::sync::Arc::new(predictor());
        let expected = predictor.predict_proba(&sample_record()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let predictor = predictor.clone();
                std::thread::spawn(move || predictor.predict_proba(&sample_record()).unwrap())
            })
            .collect();
        for handle in handles {
            let p = handle.join().unwrap();
            assert_eq!(p.to_bits(), expected.to_bits());
        }
    }
}
