//! Frozen One-Hot Encoder

use crate::vector::FeatureVector;
use crate::FeatureError;
use record_schema::{FieldValue, RawColumns};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Policy for category values never seen during training
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Emit an all-zero indicator block
    #[default]
    Ignore,
    /// Fail the transformation
    Error,
}

/// Category dropped from the indicator block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    First,
}

/// One categorical input column and its training-time categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSpec {
    pub column: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub drop: Option<DropPolicy>,
}

/// Serialized form of the encoder artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderSpec {
    pub categorical: Vec<CategoricalSpec>,
    #[serde(default)]
    pub passthrough: Vec<String>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    #[serde(default)]
    pub categorical_prefix: String,
    #[serde(default)]
    pub passthrough_prefix: String,
}

/// Compiled categorical block
#[derive(Debug, Clone)]
struct CategoricalBlock {
    column: String,
    /// Category value -> offset inside the block; dropped categories are absent
    offsets: HashMap<String, usize>,
    dropped: Option<String>,
    width: usize,
}

/// One-hot encoder with frozen categories.
///
/// Output columns follow the training library's naming: every categorical
/// block in artifact order as `{prefix}{column}_{category}`, then every
/// passthrough column as `{prefix}{column}`.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    blocks: Vec<CategoricalBlock>,
    passthrough: Vec<String>,
    handle_unknown: HandleUnknown,
    feature_names: Arc<[String]>,
}

impl OneHotEncoder {
    /// Compile an encoder from its artifact
    pub fn new(spec: EncoderSpec) -> Result<Self, FeatureError> {
        let mut blocks = Vec::with_capacity(spec.categorical.len());
        let mut feature_names = Vec::new();

        for cat in &spec.categorical {
            if cat.categories.is_empty() {
                return Err(FeatureError::InvalidArtifact(format!(
                    "categorical column {} has no categories",
                    cat.column
                )));
            }

            let skip = match cat.drop {
                Some(DropPolicy::First) => 1,
                None => 0,
            };

            let mut offsets = HashMap::with_capacity(cat.categories.len());
            for (idx, category) in cat.categories.iter().enumerate() {
                if idx < skip {
                    continue;
                }
                if offsets.insert(category.clone(), idx - skip).is_some() {
                    return Err(FeatureError::InvalidArtifact(format!(
                        "duplicate category {:?} for column {}",
                        category, cat.column
                    )));
                }
                feature_names.push(format!(
                    "{}{}_{}",
                    spec.categorical_prefix, cat.column, category
                ));
            }

            blocks.push(CategoricalBlock {
                column: cat.column.clone(),
                offsets,
                dropped: cat.categories.first().filter(|_| skip > 0).cloned(),
                width: cat.categories.len() - skip,
            });
        }

        for column in &spec.passthrough {
            feature_names.push(format!("{}{}", spec.passthrough_prefix, column));
        }

        let mut seen = HashSet::with_capacity(feature_names.len());
        if let Some(dup) = feature_names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(FeatureError::InvalidArtifact(format!(
                "encoder produces duplicate output column {}",
                dup
            )));
        }

        debug!(
            "Compiled one-hot encoder: {} categorical, {} passthrough, {} output columns",
            blocks.len(),
            spec.passthrough.len(),
            feature_names.len()
        );

        Ok(Self {
            blocks,
            passthrough: spec.passthrough,
            handle_unknown: spec.handle_unknown,
            feature_names: feature_names.into(),
        })
    }

    /// Output column names, in output order
    pub fn feature_names_out(&self) -> &[String] {
        &self.feature_names
    }

    pub(crate) fn shared_feature_names(&self) -> &Arc<[String]> {
        &self.feature_names
    }

    /// Input columns the encoder reads, categorical first
    pub fn input_columns(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .map(|b| b.column.as_str())
            .chain(self.passthrough.iter().map(String::as_str))
    }

    /// Encode one record
    pub fn transform(&self, columns: &RawColumns<'_>) -> Result<FeatureVector, FeatureError> {
        let mut values = Vec::with_capacity(self.feature_names.len());

        for block in &self.blocks {
            let value = match columns.get(&block.column) {
                Some(FieldValue::Category(v)) => v,
                Some(FieldValue::Number(_)) => {
                    return Err(FeatureError::ColumnType {
                        column: block.column.clone(),
                        expected: "categorical",
                    })
                }
                None => return Err(FeatureError::MissingColumn(block.column.clone())),
            };

            let start = values.len();
            values.resize(start + block.width, 0.0);

            match block.offsets.get(value) {
                Some(&offset) => values[start + offset] = 1.0,
                None if block.dropped.as_deref() == Some(value) => {}
                None => match self.handle_unknown {
                    HandleUnknown::Ignore => {
                        debug!("Unknown category {:?} for {}, emitting zeros", value, block.column);
                    }
                    HandleUnknown::Error => {
                        return Err(FeatureError::UnknownCategory {
                            column: block.column.clone(),
                            value: value.to_string(),
                        })
                    }
                },
            }
        }

        for column in &self.passthrough {
            match columns.get(column) {
                Some(FieldValue::Number(v)) => values.push(v),
                Some(FieldValue::Category(_)) => {
                    return Err(FeatureError::ColumnType {
                        column: column.clone(),
                        expected: "numeric",
                    })
                }
                None => return Err(FeatureError::MissingColumn(column.clone())),
            }
        }

        Ok(FeatureVector::new(self.feature_names.clone(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_record, small_encoder_spec};

    #[test]
    fn test_feature_names_out() {
        let encoder = OneHotEncoder::new(small_encoder_spec()).unwrap();
        let names: Vec<&str> = encoder.feature_names_out().iter().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "ohe__OverTime_Yes",
                "ohe__Department_Human Resources",
                "ohe__Department_Research & Development",
                "ohe__Department_Sales",
                "ohe__MaritalStatus_Divorced",
                "ohe__MaritalStatus_Married",
                "ohe__MaritalStatus_Single",
                "remainder__Age",
                "remainder__DistanceFromHome",
                "remainder__MonthlyIncome_log",
            ]
        );
    }

    #[test]
    fn test_encode_sample() {
        let encoder = OneHotEncoder::new(small_encoder_spec()).unwrap();
        let record = sample_record();
        let encoded = encoder.transform(&record.to_columns().unwrap()).unwrap();
        assert_eq!(
            encoded.values(),
            &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 41.0, 1.0, 5993f64.ln()]
        );
    }

    #[test]
    fn test_unknown_category_is_all_zero() {
        let encoder = OneHotEncoder::new(small_encoder_spec()).unwrap();
        let mut record = sample_record();
        record.department = "Legal".to_string();
        let encoded = encoder.transform(&record.to_columns().unwrap()).unwrap();
        assert_eq!(encoded.get("ohe__Department_Human Resources"), Some(0.0));
        assert_eq!(encoded.get("ohe__Department_Research & Development"), Some(0.0));
        assert_eq!(encoded.get("ohe__Department_Sales"), Some(0.0));
        assert_eq!(encoded.get("ohe__MaritalStatus_Single"), Some(1.0));
    }

    #[test]
    fn test_unknown_category_error_policy() {
        let mut spec = small_encoder_spec();
        spec.handle_unknown = HandleUnknown::Error;
        let encoder = OneHotEncoder::new(spec).unwrap();
        let mut record = sample_record();
        record.marital_status = "Widowed".to_string();
        let err = encoder.transform(&record.to_columns().unwrap()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            err,
            FeatureError::UnknownCategory {
                column: "MaritalStatus".to_string(),
                value: "Widowed".to_string(),
            }
        );
    }

    #[test]
    fn test_dropped_category_is_not_unknown() {
        let mut spec = small_encoder_spec();
        spec.handle_unknown = HandleUnknown::Error;
        let encoder = OneHotEncoder::new(spec).unwrap();
        let mut record = sample_record();
        record.over_time = "No".to_string();
        let encoded = encoder.transform(&record.to_columns().unwrap()).unwrap();
        assert_eq!(encoded.get("ohe__OverTime_Yes"), Some(0.0));
    }

    #[test]
    fn test_missing_input_column() {
        let mut spec = small_encoder_spec();
        spec.passthrough.push("EmployeeNumber".to_string());
        let encoder = OneHotEncoder::new(spec).unwrap();
        let record = sample_record();
        assert_eq!(
            encoder.transform(&record.to_columns().unwrap()),
            Err(FeatureError::MissingColumn("EmployeeNumber".to_string()))
        );
    }

    #[test]
    fn test_wrong_column_kind() {
        let mut spec = small_encoder_spec();
        spec.passthrough.push("Gender".to_string());
        let encoder = OneHotEncoder::new(spec).unwrap();
        let record = sample_record();
        assert!(matches!(
            encoder.transform(&record.to_columns().unwrap()),
            Err(FeatureError::ColumnType { expected: "numeric", .. })
        ));
    }

    #[test]
    fn test_invalid_artifacts() {
        let mut spec = small_encoder_spec();
        spec.categorical[1].categories.clear();
        assert!(matches!(
            OneHotEncoder::new(spec),
            Err(FeatureError::InvalidArtifact(_))
        ));

        let mut spec = small_encoder_spec();
        spec.categorical[2].categories.push("Single".to_string());
        assert!(OneHotEncoder::new(spec).is_err());
    }

    #[test]
    fn test_spec_from_json_defaults() {
        let json = r#"{
            "categorical": [{"column": "Gender", "categories": ["Female", "Male"]}],
            "passthrough": ["Age"]
        }"#;
        let spec: EncoderSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.handle_unknown, HandleUnknown::Ignore);
        assert_eq!(spec.categorical[0].drop, None);
        let encoder = OneHotEncoder::new(spec).unwrap();
        assert_eq!(encoder.feature_names_out(), &["Gender_Female", "Gender_Male", "Age"]);
        assert_eq!(encoder.input_columns().collect::<Vec<_>>(), vec!["Gender", "Age"]);
    }
}
