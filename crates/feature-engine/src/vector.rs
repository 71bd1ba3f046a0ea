//! Named Feature Vectors and Matrices

use ndarray::{Array2, ArrayView1};
use std::sync::Arc;

/// A row of named numeric features.
///
/// Columns are shared with the artifact that produced them, so cloning a
/// vector never copies column names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn shared_columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Value of a column by name
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// A batch of feature rows sharing one column layout
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Arc<[String]>,
    data: Array2<f64>,
}

impl FeatureMatrix {
    pub(crate) fn new(columns: Arc<[String]>, data: Array2<f64>) -> Self {
        debug_assert_eq!(columns.len(), data.ncols());
        Self { columns, data }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }
}
