//! Feature schema: the 31-column order the classifier was trained on.
//!
//! The classifier cannot detect reordered columns, so this table is the
//! single source of truth for both the encoder and the shape checks in the
//! inference layer.

use arrow::datatypes::{DataType, Field, Schema};

use crate::catalog::*;

/// Number of columns in a feature record.
pub const FEATURE_COUNT: usize = 31;

/// One slot in the feature record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column {
    Categorical(&'static CategoricalField),
    Numeric(&'static NumericField),
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Categorical(f) => f.name,
            Self::Numeric(f) => f.name,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Categorical(f) => f.title,
            Self::Numeric(f) => f.title,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }
}

/// Columns in classifier order. Categorical and numeric fields interleave.
pub static COLUMNS: [Column; FEATURE_COUNT] = [
    Column::Categorical(&LOAN_LIMIT),
    Column::Categorical(&GENDER),
    Column::Categorical(&APPROV_IN_ADV),
    Column::Categorical(&LOAN_TYPE),
    Column::Categorical(&LOAN_PURPOSE),
    Column::Categorical(&CREDIT_WORTHINESS),
    Column::Categorical(&OPEN_CREDIT),
    Column::Categorical(&BUSINESS_OR_COMMERCIAL),
    Column::Numeric(&LOAN_AMOUNT),
    Column::Numeric(&RATE_OF_INTEREST),
    Column::Numeric(&INTEREST_RATE_SPREAD),
    Column::Numeric(&UPFRONT_CHARGES),
    Column::Numeric(&TERM),
    Column::Categorical(&NEG_AMMORTIZATION),
    Column::Categorical(&INTEREST_ONLY),
    Column::Categorical(&LUMP_SUM_PAYMENT),
    Column::Numeric(&PROPERTY_VALUE),
    Column::Categorical(&CONSTRUCTION_TYPE),
    Column::Categorical(&OCCUPANCY_TYPE),
    Column::Categorical(&SECURED_BY),
    Column::Categorical(&TOTAL_UNITS),
    Column::Numeric(&INCOME),
    Column::Categorical(&CREDIT_TYPE),
    Column::Numeric(&CREDIT_SCORE),
    Column::Categorical(&CO_APPLICANT_CREDIT_TYPE),
    Column::Categorical(&AGE),
    Column::Categorical(&SUBMISSION_OF_APPLICATION),
    Column::Numeric(&LTV),
    Column::Categorical(&REGION),
    Column::Categorical(&SECURITY_TYPE),
    Column::Numeric(&DTIR1),
];

/// Column names in classifier order.
pub fn column_names() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(Column::name)
}

/// Position and definition of the column called `name`.
pub fn column(name: &str) -> Option<(usize, Column)> {
    COLUMNS
        .iter()
        .enumerate()
        .find(|(_, c)| c.name() == name)
        .map(|(i, c)| (i, *c))
}

/// Arrow schema for a feature record.
///
/// Categorical codes are `Int64`, numeric pass-through values `Float64`.
pub fn feature_schema() -> Schema {
    Schema::new(
        COLUMNS
            .iter()
            .map(|c| {
                let data_type = if c.is_categorical() {
                    DataType::Int64
                } else {
                    DataType::Float64
                };
                Field::new(c.name(), data_type, false)
            })
            .collect::<Vec<_>>(),
    )
}
