//! Feature Alignment onto the Selected Feature List

use crate::vector::FeatureVector;
use crate::FeatureError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Reindexes encoded vectors onto the frozen, ordered `selected_features`.
///
/// The plan is resolved by name once, so per-record alignment is a gather:
/// selected columns the encoder never produces are filled with `0.0`, and
/// encoded columns outside the selection are discarded.
#[derive(Debug, Clone)]
pub struct Aligner {
    input_columns: Arc<[String]>,
    selected: Arc<[String]>,
    /// For each selected column, its index in the encoded vector
    sources: Vec<Option<usize>>,
}

impl Aligner {
    /// Resolve the alignment plan from encoder output names to the selection
    pub fn new(input_columns: Arc<[String]>, selected: Vec<String>) -> Result<Self, FeatureError> {
        let mut seen = HashSet::with_capacity(selected.len());
        for column in &selected {
            if !seen.insert(column.as_str()) {
                return Err(FeatureError::InvalidArtifact(format!(
                    "selected feature {} listed twice",
                    column
                )));
            }
        }

        let index: HashMap<&str, usize> = input_columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();

        let sources = selected
            .iter()
            .map(|column| index.get(column.as_str()).copied())
            .collect();

        Ok(Self {
            input_columns,
            selected: selected.into(),
            sources,
        })
    }

    /// Output columns, always exactly the selected features in order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub(crate) fn shared_selected(&self) -> &Arc<[String]> {
        &self.selected
    }

    /// Selected columns the encoder never produces (always zero-filled)
    pub fn zero_filled_columns(&self) -> Vec<&str> {
        self.selected
            .iter()
            .zip(&self.sources)
            .filter(|(_, source)| source.is_none())
            .map(|(column, _)| column.as_str())
            .collect()
    }

    /// Encoded columns not in the selection (always discarded)
    pub fn discarded_columns(&self) -> Vec<&str> {
        let used: HashSet<usize> = self.sources.iter().flatten().copied().collect();
        self.input_columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| !used.contains(idx))
            .map(|(_, column)| column.as_str())
            .collect()
    }

    /// Align one encoded vector
    pub fn align(&self, encoded: &FeatureVector) -> Result<FeatureVector, FeatureError> {
        if !Arc::ptr_eq(encoded.shared_columns(), &self.input_columns)
            && encoded.columns() != &*self.input_columns
        {
            return Err(FeatureError::ColumnMismatch);
        }

        let mut values = Vec::with_capacity(self.selected.len());
        self.gather(encoded.values(), &mut values);
        Ok(FeatureVector::new(self.selected.clone(), values))
    }

    /// Append the aligned values of one encoded row to `out`
    pub(crate) fn gather(&self, encoded: &[f64], out: &mut Vec<f64>) {
        out.extend(
            self.sources
                .iter()
                .map(|source| source.map_or(0.0, |idx| encoded[idx])),
        );
    }
}
