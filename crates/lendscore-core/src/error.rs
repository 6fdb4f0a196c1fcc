use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("unknown label {label:?} for field {field}")]
    UnknownLabel { field: &'static str, label: String },

    #[error("missing value for field {0}")]
    MissingField(&'static str),

    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("field {0} expects a label, got a number")]
    ExpectedLabel(&'static str),

    #[error("field {0} expects a number, got a label")]
    ExpectedNumber(&'static str),

    #[error("value {value} for field {field} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("value for field {0} is not a finite number")]
    NotFinite(&'static str),
}
