//! Validation Error Types

use thiserror::Error;

/// Errors raised while validating a raw employee record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value must be strictly positive (e.g. argument of a logarithm)
    #[error("{field} must be greater than 0, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// Categorical field is empty or whitespace
    #[error("{0} must not be empty")]
    EmptyCategory(&'static str),
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => *field,
            ValidationError::NonPositive { field, .. } => *field,
            ValidationError::EmptyCategory(field) => *field,
        }
    }
}
