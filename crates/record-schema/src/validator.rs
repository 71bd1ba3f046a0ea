//! Record Validator for Domain Checks

use crate::error::ValidationError;
use crate::record::EmployeeRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordinal survey-style fields checked against `rating_range`
const RATING_FIELDS: [&str; 9] = [
    "Education",
    "EnvironmentSatisfaction",
    "JobInvolvement",
    "JobSatisfaction",
    "RelationshipSatisfaction",
    "StockOptionLevel",
    "WorkLifeBalance",
    "JobLevel",
    "PerformanceRating",
];

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Age valid range (years)
    pub age_range: (f64, f64),
    /// Valid range for ordinal rating fields
    pub rating_range: (f64, f64),
    /// Upper bound for every other count, rate or amount
    pub max_amount: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (0.0, 120.0),
            rating_range: (0.0, 5.0),
            max_amount: 1.0e9,
        }
    }
}

/// Domain validator for employee records.
///
/// Runs before the feature pipeline and fails fast on the first bad field.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a whole record
    pub fn validate(&self, record: &EmployeeRecord) -> Result<(), ValidationError> {
        for (field, value) in record.categorical_values() {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyCategory(field));
            }
        }

        if record.monthly_income <= 0 {
            return Err(ValidationError::NonPositive {
                field: "MonthlyIncome",
                value: record.monthly_income as f64,
            });
        }

        for (field, value) in record.numeric_values() {
            let value = value as f64;
            let range = if field == "Age" {
                self.config.age_range
            } else if RATING_FIELDS.contains(&field) {
                self.config.rating_range
            } else {
                (0.0, self.config.max_amount)
            };
            self.validate_range(field, value, range)?;
        }

        debug!("Record passed validation");
        Ok(())
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
