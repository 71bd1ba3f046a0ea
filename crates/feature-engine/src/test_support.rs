//! Shared fixtures for feature-engine tests

use crate::encoder::{CategoricalSpec, DropPolicy, EncoderSpec, HandleUnknown};
use crate::scaler::ScalerSpec;
use record_schema::EmployeeRecord;

/// The documented sample employee, from the shared fixture
pub(crate) fn sample_record() -> EmployeeRecord {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/sample_employee.json");
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn categorical(column: &str, categories: &[&str], drop: Option<DropPolicy>) -> CategoricalSpec {
    CategoricalSpec {
        column: column.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        drop,
    }
}

/// Encoder over a handful of the schema's columns
pub(crate) fn small_encoder_spec() -> EncoderSpec {
    EncoderSpec {
        categorical: vec![
            categorical("OverTime", &["No", "Yes"], Some(DropPolicy::First)),
            categorical(
                "Department",
                &["Human Resources", "Research & Development", "Sales"],
                None,
            ),
            categorical("MaritalStatus", &["Divorced", "Married", "Single"], None),
        ],
        passthrough: vec![
            "Age".to_string(),
            "DistanceFromHome".to_string(),
            "MonthlyIncome_log".to_string(),
        ],
        handle_unknown: HandleUnknown::Ignore,
        categorical_prefix: "ohe__".to_string(),
        passthrough_prefix: "remainder__".to_string(),
    }
}

pub(crate) fn small_selected() -> Vec<String> {
    [
        "remainder__MonthlyIncome_log",
        "ohe__OverTime_Yes",
        "ohe__Department_Sales",
        "remainder__Age",
        "ohe__MaritalStatus_Single",
        "ohe__JobRole_Grouped_Manager",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn small_continuous() -> Vec<String> {
    [
        "remainder__Age",
        "remainder__DistanceFromHome",
        "remainder__MonthlyIncome_log",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn small_scaler_spec() -> ScalerSpec {
    ScalerSpec::Standard {
        columns: small_continuous(),
        mean: vec![36.9, 9.2, 8.5],
        scale: vec![9.1, 8.1, 0.65],
    }
}
