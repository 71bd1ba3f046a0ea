//! Employee Record Schema
//!
//! Provides the closed input record, field-level validation, and the derived
//! `MonthlyIncome_log` feature consumed by the feature pipeline.

mod error;
mod record;
mod validator;

pub use error::ValidationError;
pub use record::{
    monthly_income_log, EmployeeRecord, FieldValue, RawColumns, CATEGORICAL_FIELDS,
    MONTHLY_INCOME_LOG, NUMERIC_FIELDS,
};
pub use validator::{ValidationConfig, Validator};
