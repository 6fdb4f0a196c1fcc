//! The encoded feature record handed to the classifier.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::schema::{COLUMNS, Column, FEATURE_COUNT, column, feature_schema};

/// An ordered vector of feature values.
///
/// Records produced by [`encode`](crate::encode) always hold exactly
/// [`FEATURE_COUNT`] values in [`COLUMNS`] order. Records built with
/// [`from_values`](Self::from_values) are taken as-is; the inference layer
/// checks their shape before use.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<f64>,
}

impl FeatureRecord {
    /// Wrap an already-encoded vector.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the column called `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        let (idx, _) = column(name)?;
        self.values.get(idx).copied()
    }

    /// Pair each value with its schema column.
    pub fn columns(&self) -> impl Iterator<Item = (Column, f64)> + '_ {
        COLUMNS.iter().copied().zip(self.values.iter().copied())
    }

    /// Convert to a one-row Arrow batch against [`feature_schema`].
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        if self.values.len() != FEATURE_COUNT {
            return Err(ArrowError::InvalidArgumentError(format!(
                "feature record has {} values, schema has {FEATURE_COUNT}",
                self.values.len()
            )));
        }

        let arrays: Vec<ArrayRef> = self
            .columns()
            .map(|(col, value)| -> ArrayRef {
                if col.is_categorical() {
                    Arc::new(Int64Array::from(vec![value as i64]))
                } else {
                    Arc::new(Float64Array::from(vec![value]))
                }
            })
            .collect();

        RecordBatch::try_new(Arc::new(feature_schema()), arrays)
    }
}
