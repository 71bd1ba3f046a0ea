//! Logistic Regression Classifier

use crate::InferenceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a model artifact cannot be used
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("expected a binary classifier, found {0} classes")]
    NotBinary(usize),
    #[error("model has no coefficients")]
    NoCoefficients,
    #[error("model coefficients are not finite")]
    NonFinite,
}

/// Class label as exported by the training process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Int(i64),
    Text(String),
}

/// Serialized form of the model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    #[serde(default)]
    pub version: Option<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Sorted class labels; the positive class is the second one
    #[serde(default = "default_classes")]
    pub classes: Vec<ClassLabel>,
}

fn default_classes() -> Vec<ClassLabel> {
    vec![ClassLabel::Int(0), ClassLabel::Int(1)]
}

/// Binary logistic regression with frozen coefficients
#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
    version: Option<String>,
}

impl LogisticModel {
    /// Build a model from its artifact
    pub fn new(spec: ModelSpec) -> Result<Self, ModelError> {
        if spec.classes.len() != 2 {
            return Err(ModelError::NotBinary(spec.classes.len()));
        }
        if spec.coefficients.is_empty() {
            return Err(ModelError::NoCoefficients);
        }
        if !spec.intercept.is_finite() || spec.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        Ok(Self {
            coefficients: spec.coefficients,
            intercept: spec.intercept,
            version: spec.version,
        })
    }

    /// Number of input features the model expects
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Linear score `intercept + Σ coefᵢ·xᵢ`, summed in column order
    pub fn decision_function<'a, I>(&self, features: I) -> Result<f64, InferenceError>
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: ExactSizeIterator,
    {
        let features = features.into_iter();
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        let dot: f64 = features
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.intercept)
    }

    /// Probability of the positive ("will leave") class
    pub fn predict_proba<'a, I>(&self, features: I) -> Result<f64, InferenceError>
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: ExactSizeIterator,
    {
        let probability = sigmoid(self.decision_function(features)?);
        if !probability.is_finite() {
            return Err(InferenceError::NonFiniteProbability);
        }
        Ok(probability)
    }
}

/// Logistic function, stable for large |z|
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(coefficients: Vec<f64>, intercept: f64) -> LogisticModel {
        LogisticModel::new(ModelSpec {
            version: None,
            coefficients,
            intercept,
            classes: default_classes(),
        })
        .unwrap()
    }

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(40.0) > 0.999999);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_predict_proba() {
        let model = model(vec![0.5, -1.0], 0.25);
        let z: f64 = 0.5 * 2.0 + -1.0 * 1.0 + 0.25;
        let p = model.predict_proba(&[2.0, 1.0]).unwrap();
        assert!((p - 1.0 / (1.0 + (-z).exp())).abs() < 1e-15);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = model(vec![0.5, -1.0], 0.0);
        assert!(matches!(
            model.predict_proba(&[1.0]),
            Err(InferenceError::InvalidInputShape { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_spec_parsing() {
        let spec: ModelSpec =
            serde_json::from_str(r#"{"coefficients": [1.0], "intercept": 0.0}"#).unwrap();
        assert_eq!(spec.classes, default_classes());

        let spec: ModelSpec = serde_json::from_str(
            r#"{"coefficients": [1.0], "intercept": 0.0, "classes": ["No", "Yes"]}"#,
        )
        .unwrap();
        assert!(LogisticModel::new(spec).is_ok());
    }

    #[test]
    fn test_invalid_specs() {
        let multi = ModelSpec {
            version: None,
            coefficients: vec![1.0],
            intercept: 0.0,
            classes: vec![ClassLabel::Int(0), ClassLabel::Int(1), ClassLabel::Int(2)],
        };
        assert_eq!(LogisticModel::new(multi).unwrap_err(), ModelError::NotBinary(3));

        let nan = ModelSpec {
            version: None,
            coefficients: vec![f64::NAN],
            intercept: 0.0,
            classes: default_classes(),
        };
        assert_eq!(LogisticModel::new(nan).unwrap_err(), ModelError::NonFinite);

        let empty = ModelSpec {
            version: None,
            coefficients: vec![],
            intercept: 0.0,
            classes: default_classes(),
        };
        assert_eq!(LogisticModel::new(empty).unwrap_err(), ModelError::NoCoefficients);
    }
}
