//! Feature Alignment Pipeline

use crate::align::Aligner;
use crate::encoder::OneHotEncoder;
use crate::scaler::{ColumnTransform, ContinuousScaler};
use crate::vector::{FeatureMatrix, FeatureVector};
use crate::FeatureError;
use ndarray::Array2;
use record_schema::{EmployeeRecord, RawColumns};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Derive → Encode → Align → Scale, over frozen artifacts.
///
/// Immutable after construction; share it behind an `Arc` across threads.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    encoder: OneHotEncoder,
    aligner: Aligner,
    /// (index into selected features, transform), in `continuous_cols` order
    scale_plan: Vec<(usize, ColumnTransform)>,
    dropped_continuous: Vec<String>,
}

impl FeaturePipeline {
    /// Assemble the pipeline and resolve every column reference by name.
    ///
    /// Continuous columns outside the selection are skipped. A continuous
    /// column inside the selection without scaler statistics is an error.
    pub fn new(
        encoder: OneHotEncoder,
        scaler: ContinuousScaler,
        selected_features: Vec<String>,
        continuous_cols: Vec<String>,
    ) -> Result<Self, FeatureError> {
        let aligner = Aligner::new(encoder.shared_feature_names().clone(), selected_features)?;

        let mut scale_plan = Vec::new();
        let mut dropped_continuous = Vec::new();
        let mut planned = HashSet::new();

        for column in continuous_cols {
            let Some(idx) = aligner.selected().iter().position(|c| *c == column) else {
                dropped_continuous.push(column);
                continue;
            };
            if !planned.insert(idx) {
                continue;
            }
            let transform = scaler
                .transform_for(&column)
                .ok_or_else(|| FeatureError::ScalerColumnMissing(column.clone()))?;
            scale_plan.push((idx, transform));
        }

        let zero_filled = aligner.zero_filled_columns();
        if !zero_filled.is_empty() {
            warn!("Selected features never produced by the encoder, filled with zeros: {:?}", zero_filled);
        }
        if !dropped_continuous.is_empty() {
            debug!("Continuous columns outside the selection: {:?}", dropped_continuous);
        }

        Ok(Self {
            encoder,
            aligner,
            scale_plan,
            dropped_continuous,
        })
    }

    /// Column order of every vector this pipeline emits
    pub fn selected_features(&self) -> &[String] {
        self.aligner.selected()
    }

    /// Columns that get rescaled: `continuous_cols` ∩ `selected_features`
    pub fn scaled_columns(&self) -> Vec<&str> {
        self.scale_plan
            .iter()
            .map(|(idx, _)| self.aligner.selected()[*idx].as_str())
            .collect()
    }

    /// Continuous columns that were dropped by feature selection
    pub fn dropped_continuous_columns(&self) -> &[String] {
        &self.dropped_continuous
    }

    pub fn zero_filled_columns(&self) -> Vec<&str> {
        self.aligner.zero_filled_columns()
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    /// Raw columns of a record plus the derived `MonthlyIncome_log`
    pub fn derive<'r>(&self, record: &'r EmployeeRecord) -> Result<RawColumns<'r>, FeatureError> {
        Ok(record.to_columns()?)
    }

    /// Derive + encode one record
    pub fn encode(&self, record: &EmployeeRecord) -> Result<FeatureVector, FeatureError> {
        let columns = self.derive(record)?;
        self.encoder.transform(&columns)
    }

    /// Reindex an encoded vector onto the selected features
    pub fn align(&self, encoded: &FeatureVector) -> Result<FeatureVector, FeatureError> {
        self.aligner.align(encoded)
    }

    /// Rescale the continuous columns of an aligned vector in place
    pub fn scale(&self, mut aligned: FeatureVector) -> Result<FeatureVector, FeatureError> {
        if !Arc::ptr_eq(aligned.shared_columns(), self.aligner.shared_selected())
            && aligned.columns() != self.selected_features()
        {
            return Err(FeatureError::ColumnMismatch);
        }
        self.scale_row(aligned.values_mut());
        self.check_finite(aligned.values())?;
        Ok(aligned)
    }

    /// Full pipeline for one record
    pub fn transform(&self, record: &EmployeeRecord) -> Result<FeatureVector, FeatureError> {
        let encoded = self.encode(record)?;
        let aligned = self.align(&encoded)?;
        let scaled = self.scale(aligned)?;
        debug!("Transformed record into {} features", scaled.len());
        Ok(scaled)
    }

    /// Full pipeline for a batch; rows keep input order.
    ///
    /// Fails as a whole on the first bad row, reporting its index.
    pub fn transform_batch(&self, records: &[EmployeeRecord]) -> Result<FeatureMatrix, FeatureError> {
        let width = self.selected_features().len();
        let mut flat = Vec::with_capacity(records.len() * width);

        for (row, record) in records.iter().enumerate() {
            let encoded = self.encode(record).map_err(|e| FeatureError::Row {
                row,
                source: Box::new(e),
            })?;
            self.aligner.gather(encoded.values(), &mut flat);
        }

        let mut data = Array2::from_shape_vec((records.len(), width), flat)
            .map_err(|e| FeatureError::Shape(e.to_string()))?;

        for (idx, transform) in &self.scale_plan {
            data.column_mut(*idx).mapv_inplace(|x| transform.apply(x));
        }

        for (row, values) in data.rows().into_iter().enumerate() {
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(FeatureError::Row {
                    row,
                    source: Box::new(FeatureError::NonFinite {
                        column: self.selected_features()[col].clone(),
                    }),
                });
            }
        }

        debug!("Transformed batch of {} records", records.len());
        Ok(FeatureMatrix::new(self.aligner.shared_selected().clone(), data))
    }

    fn scale_row(&self, values: &mut [f64]) {
        for (idx, transform) in &self.scale_plan {
            values[*idx] = transform.apply(values[*idx]);
        }
    }

    fn check_finite(&self, values: &[f64]) -> Result<(), FeatureError> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(col) => Err(FeatureError::NonFinite {
                column: self.selected_features()[col].clone(),
            }),
            None => Ok(()),
        }
    }
}
