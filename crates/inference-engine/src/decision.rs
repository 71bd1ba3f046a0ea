//! Business Decision Rules
//!
//! Fixed thresholds applied to the positive-class probability. All
//! comparisons are strict: 0.5 maps to "no", 0.7 to "Medium", 0.3 to "Low".
//! The asymmetry between the label cut and the band cuts is inherited
//! business logic and is kept as is.

use serde::{Deserialize, Serialize};

/// Probability above which an employee is predicted to leave
pub const PREDICTION_THRESHOLD: f64 = 0.5;
/// Probability above which risk is "High"
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Probability above which risk is at least "Medium"
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.3;

/// Predicted attrition label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttritionLabel {
    Yes,
    No,
}

impl AttritionLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > PREDICTION_THRESHOLD {
            AttritionLabel::Yes
        } else {
            AttritionLabel::No
        }
    }

    /// Batch-output encoding: 1 = will leave, 0 = will stay
    pub fn as_flag(&self) -> u8 {
        match self {
            AttritionLabel::Yes => 1,
            AttritionLabel::No => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttritionLabel::Yes => "yes",
            AttritionLabel::No => "no",
        }
    }
}

/// Risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if probability > MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}
