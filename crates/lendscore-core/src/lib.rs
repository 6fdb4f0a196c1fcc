//! Core types for loan default scoring: field catalog, feature schema, encoder.

pub mod catalog;
pub mod encoder;
mod error;
pub mod record;
pub mod schema;
mod verdict;

pub use catalog::{CategoricalField, NumericField};
pub use encoder::{RawInputs, RawValue, encode};
pub use error::EncodeError;
pub use record::FeatureRecord;
pub use schema::{COLUMNS, Column, FEATURE_COUNT, feature_schema};
pub use verdict::Verdict;
