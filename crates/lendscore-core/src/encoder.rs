//! Feature encoder: raw form values → [`FeatureRecord`].
//!
//! Categorical labels become their catalog codes, numeric values pass
//! through after a range check. Every schema field must be present and no
//! extra fields are accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::EncodeError;
use crate::record::FeatureRecord;
use crate::schema::{COLUMNS, Column, FEATURE_COUNT, column};

/// A single raw input value as supplied by an input collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Label(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Label(s)
    }
}

/// Raw values keyed by field name.
///
/// Deserializes from a flat JSON object such as
/// `{"Gender": "Male", "loan_amount": 200000}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputs(BTreeMap<String, RawValue>);

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builder-style insert of a categorical label.
    pub fn label(mut self, name: &str, label: &str) -> Self {
        self.insert(name, RawValue::from(label));
        self
    }

    /// Builder-style insert of a numeric value.
    pub fn number(mut self, name: &str, value: f64) -> Self {
        self.insert(name, RawValue::Number(value));
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, name: &str, value: RawValue) -> Option<RawValue> {
        self.0.insert(name.to_string(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: RawInputs) {
        self.0.extend(other.0);
    }
}

/// Encode one application into a feature record in classifier column order.
pub fn encode(inputs: &RawInputs) -> Result<FeatureRecord, EncodeError> {
    if let Some(extra) = inputs.names().find(|name| column(name).is_none()) {
        return Err(EncodeError::UnknownField(extra.to_string()));
    }

    let mut values = Vec::with_capacity(FEATURE_COUNT);
    for col in &COLUMNS {
        let raw = inputs
            .get(col.name())
            .ok_or(EncodeError::MissingField(col.name()))?;
        values.push(encode_value(col, raw)?);
    }

    debug!(columns = values.len(), "encoded feature record");
    Ok(FeatureRecord::from_values(values))
}

fn encode_value(col: &Column, raw: &RawValue) -> Result<f64, EncodeError> {
    match (col, raw) {
        (Column::Categorical(field), RawValue::Label(label)) => {
            field.encode(label).map(f64::from)
        }
        (Column::Numeric(field), RawValue::Number(value)) => field.validate(*value),
        (Column::Categorical(field), RawValue::Number(_)) => {
            Err(EncodeError::ExpectedLabel(field.name))
        }
        (Column::Numeric(field), RawValue::Label(_)) => {
            Err(EncodeError::ExpectedNumber(field.name))
        }
    }
}
