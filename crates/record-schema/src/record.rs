//! Employee Record and Raw Column View

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Name of the derived log-income column
pub const MONTHLY_INCOME_LOG: &str = "MonthlyIncome_log";

/// Categorical fields, in schema order
pub const CATEGORICAL_FIELDS: [&str; 7] = [
    "Gender",
    "OverTime",
    "BusinessTravel",
    "Department",
    "EducationField",
    "MaritalStatus",
    "JobRole_Grouped",
];

/// Numeric fields, in schema order
pub const NUMERIC_FIELDS: [&str; 23] = [
    "Age",
    "DailyRate",
    "DistanceFromHome",
    "Education",
    "EnvironmentSatisfaction",
    "HourlyRate",
    "JobInvolvement",
    "JobSatisfaction",
    "MonthlyRate",
    "NumCompaniesWorked",
    "PercentSalaryHike",
    "RelationshipSatisfaction",
    "StockOptionLevel",
    "TrainingTimesLastYear",
    "WorkLifeBalance",
    "YearsAtCompany",
    "YearsSinceLastPromotion",
    "MonthlyIncome",
    "JobLevel",
    "YearsWithCurrManager",
    "YearsInCurrentRole",
    "TotalWorkingYears",
    "PerformanceRating",
];

/// One employee as submitted for scoring.
///
/// The schema is closed: every field is required and unknown fields are
/// rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct EmployeeRecord {
    pub gender: String,
    pub over_time: String,
    pub business_travel: String,
    pub department: String,
    pub education_field: String,
    pub marital_status: String,
    #[serde(rename = "JobRole_Grouped")]
    pub job_role_grouped: String,

    pub age: i64,
    pub daily_rate: i64,
    pub distance_from_home: i64,
    pub education: i64,
    pub environment_satisfaction: i64,
    pub hourly_rate: i64,
    pub job_involvement: i64,
    pub job_satisfaction: i64,
    pub monthly_rate: i64,
    pub num_companies_worked: i64,
    pub percent_salary_hike: i64,
    pub relationship_satisfaction: i64,
    pub stock_option_level: i64,
    pub training_times_last_year: i64,
    pub work_life_balance: i64,
    pub years_at_company: i64,
    pub years_since_last_promotion: i64,
    pub monthly_income: i64,
    pub job_level: i64,
    pub years_with_curr_manager: i64,
    pub years_in_current_role: i64,
    pub total_working_years: i64,
    pub performance_rating: i64,
}

impl EmployeeRecord {
    /// Categorical values paired with their column names
    pub fn categorical_values(&self) -> [(&'static str, &str); 7] {
        [
            (CATEGORICAL_FIELDS[0], self.gender.as_str()),
            (CATEGORICAL_FIELDS[1], self.over_time.as_str()),
            (CATEGORICAL_FIELDS[2], self.business_travel.as_str()),
            (CATEGORICAL_FIELDS[3], self.department.as_str()),
            (CATEGORICAL_FIELDS[4], self.education_field.as_str()),
            (CATEGORICAL_FIELDS[5], self.marital_status.as_str()),
            (CATEGORICAL_FIELDS[6], self.job_role_grouped.as_str()),
        ]
    }

    /// Numeric values paired with their column names
    pub fn numeric_values(&self) -> [(&'static str, i64); 23] {
        [
            (NUMERIC_FIELDS[0], self.age),
            (NUMERIC_FIELDS[1], self.daily_rate),
            (NUMERIC_FIELDS[2], self.distance_from_home),
            (NUMERIC_FIELDS[3], self.education),
            (NUMERIC_FIELDS[4], self.environment_satisfaction),
            (NUMERIC_FIELDS[5], self.hourly_rate),
            (NUMERIC_FIELDS[6], self.job_involvement),
            (NUMERIC_FIELDS[7], self.job_satisfaction),
            (NUMERIC_FIELDS[8], self.monthly_rate),
            (NUMERIC_FIELDS[9], self.num_companies_worked),
            (NUMERIC_FIELDS[10], self.percent_salary_hike),
            (NUMERIC_FIELDS[11], self.relationship_satisfaction),
            (NUMERIC_FIELDS[12], self.stock_option_level),
            (NUMERIC_FIELDS[13], self.training_times_last_year),
            (NUMERIC_FIELDS[14], self.work_life_balance),
            (NUMERIC_FIELDS[15], self.years_at_company),
            (NUMERIC_FIELDS[16], self.years_since_last_promotion),
            (NUMERIC_FIELDS[17], self.monthly_income),
            (NUMERIC_FIELDS[18], self.job_level),
            (NUMERIC_FIELDS[19], self.years_with_curr_manager),
            (NUMERIC_FIELDS[20], self.years_in_current_role),
            (NUMERIC_FIELDS[21], self.total_working_years),
            (NUMERIC_FIELDS[22], self.performance_rating),
        ]
    }

    /// Build the raw column view, appending the derived `MonthlyIncome_log`.
    ///
    /// Fails if `MonthlyIncome` is not strictly positive.
    pub fn to_columns(&self) -> Result<RawColumns<'_>, ValidationError> {
        let income_log = monthly_income_log(self.monthly_income)?;

        let mut entries = Vec::with_capacity(CATEGORICAL_FIELDS.len() + NUMERIC_FIELDS.len() + 1);
        for (name, value) in self.categorical_values() {
            entries.push((name, FieldValue::Category(value)));
        }
        for (name, value) in self.numeric_values() {
            entries.push((name, FieldValue::Number(value as f64)));
        }
        entries.push((MONTHLY_INCOME_LOG, FieldValue::Number(income_log)));

        Ok(RawColumns { entries })
    }
}

/// Natural log of monthly income, guarded against a non-positive argument
pub fn monthly_income_log(monthly_income: i64) -> Result<f64, ValidationError> {
    if monthly_income <= 0 {
        return Err(ValidationError::NonPositive {
            field: "MonthlyIncome",
            value: monthly_income as f64,
        });
    }
    Ok((monthly_income as f64).ln())
}

/// A single raw column value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Category(&'a str),
    Number(f64),
}

/// Named raw columns of one record, including derived columns
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumns<'a> {
    entries: Vec<(&'static str, FieldValue<'a>)>,
}

impl<'a> RawColumns<'a> {
    /// Look up a column by name
    pub fn get(&self, name: &str) -> Option<FieldValue<'a>> {
        self.entries
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| *value)
    }

    /// Iterate over all columns in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldValue<'a>)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The documented sample employee, from the shared fixture
    pub(crate) fn sample_record() -> EmployeeRecord {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../fixtures/sample_employee.json");
        let text = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_deserialize_sample_fixture() {
        let record = sample_record();
        assert_eq!(record.age, 41);
        assert_eq!(record.department, "Sales");
        assert_eq!(record.over_time, "Yes");
        assert_eq!(record.job_role_grouped, "Sales Executive");
        assert_eq!(record.monthly_income, 5993);
        assert_eq!(record.training_times_last_year, 0);
    }

    #[test]
    fn test_round_trips_through_json_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(value["JobRole_Grouped"], "Sales Executive");
        assert_eq!(value["YearsWithCurrManager"], 5);
        assert_eq!(value.as_object().unwrap().len(), 30);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        value["EmployeeNumber"] = serde_json::json!(1);
        assert!(serde_json::from_value::<EmployeeRecord>(value).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        value.as_object_mut().unwrap().remove("MonthlyIncome");
        assert!(serde_json::from_value::<EmployeeRecord>(value).is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        value["Age"] = serde_json::json!("forty-one");
        assert!(serde_json::from_value::<EmployeeRecord>(value).is_err());
    }

    #[test]
    fn test_columns_include_derived_log() {
        let record = sample_record();
        let columns = record.to_columns().unwrap();
        assert_eq!(columns.len(), 31);
        assert_eq!(columns.get("Department"), Some(FieldValue::Category("Sales")));
        assert_eq!(columns.get("MonthlyIncome"), Some(FieldValue::Number(5993.0)));
        assert_eq!(
            columns.get(MONTHLY_INCOME_LOG),
            Some(FieldValue::Number(5993f64.ln()))
        );
        assert_eq!(columns.get("EmployeeNumber"), None);
    }

    #[test]
    fn test_income_log_guard() {
        assert!(matches!(
            monthly_income_log(0),
            Err(ValidationError::NonPositive { field: "MonthlyIncome", .. })
        ));
        assert!(monthly_income_log(-10).is_err());
        assert!((monthly_income_log(1).unwrap() - 0.0).abs() < f64::EPSILON);

        let mut record = sample_record();
        record.monthly_income = 0;
        assert!(record.to_columns().is_err());
    }
}
