//! Field catalog for loan applications.
//!
//! Categorical fields carry a fixed label → code table; numeric fields carry
//! the range an input collaborator is allowed to submit. The codes are the
//! ones the classifier was trained against and must never be renumbered.

use crate::EncodeError;

/// A categorical input field with a fixed label → code table.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoricalField {
    /// Column name as the classifier knows it.
    pub name: &'static str,
    /// Form title shown to users.
    pub title: &'static str,
    /// `(label, code)` pairs in declaration order.
    pub labels: &'static [(&'static str, u32)],
}

impl CategoricalField {
    pub const fn new(
        name: &'static str,
        title: &'static str,
        labels: &'static [(&'static str, u32)],
    ) -> Self {
        Self {
            name,
            title,
            labels,
        }
    }

    /// Look up the code for `label`.
    ///
    /// Labels are matched exactly; an unrecognised label is an error, never
    /// a default code.
    pub fn encode(&self, label: &str) -> Result<u32, EncodeError> {
        self.labels
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, code)| code)
            .ok_or_else(|| EncodeError::UnknownLabel {
                field: self.name,
                label: label.to_string(),
            })
    }

    /// Reverse lookup: the label for `code`, if any.
    pub fn decode(&self, code: u32) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|&&(_, c)| c == code)
            .map(|&(label, _)| label)
    }
}

/// A numeric input field, passed through to the feature record unencoded.
#[derive(Debug, PartialEq)]
pub struct NumericField {
    pub name: &'static str,
    pub title: &'static str,
    pub min: f64,
    pub max: f64,
    /// Input granularity offered to users. Not enforced here.
    pub step: f64,
}

impl NumericField {
    pub const fn new(
        name: &'static str,
        title: &'static str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        Self {
            name,
            title,
            min,
            max,
            step,
        }
    }

    /// Check `value` against the declared range and return it unchanged.
    pub fn validate(&self, value: f64) -> Result<f64, EncodeError> {
        if !value.is_finite() {
            return Err(EncodeError::NotFinite(self.name));
        }
        if value < self.min || value > self.max {
            return Err(EncodeError::OutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

// ── Label tables ──

const NO_YES: &[(&str, u32)] = &[("No", 0), ("Yes", 1)];
const TYPE_1_2: &[(&str, u32)] = &[("Type 1", 0), ("Type 2", 1)];

// ── Categorical fields ──

pub const LOAN_LIMIT: CategoricalField =
    CategoricalField::new("loan_limit", "Loan Limit", &[("Not Limited", 0), ("Limited", 1)]);
pub const GENDER: CategoricalField = CategoricalField::new(
    "Gender",
    "Gender",
    &[("Male", 0), ("Female", 1), ("Joint", 2), ("Not Available", 3)],
);
pub const APPROV_IN_ADV: CategoricalField =
    CategoricalField::new("approv_in_adv", "Approval in Advance", NO_YES);
pub const LOAN_TYPE: CategoricalField = CategoricalField::new(
    "loan_type",
    "Loan Type",
    &[("Type 1", 0), ("Type 2", 1), ("Type 3", 2)],
);
pub const LOAN_PURPOSE: CategoricalField = CategoricalField::new(
    "loan_purpose",
    "Loan Purpose",
    &[
        ("Home Purchase", 0),
        ("Refinance", 1),
        ("Improvement", 2),
        ("Other", 3),
    ],
);
pub const CREDIT_WORTHINESS: CategoricalField =
    CategoricalField::new("Credit_Worthiness", "Credit Worthiness", &[("Good", 0), ("Bad", 1)]);
pub const OPEN_CREDIT: CategoricalField =
    CategoricalField::new("open_credit", "Open Credit", NO_YES);
pub const BUSINESS_OR_COMMERCIAL: CategoricalField =
    CategoricalField::new("business_or_commercial", "Business/Commercial", NO_YES);
pub const NEG_AMMORTIZATION: CategoricalField =
    CategoricalField::new("Neg_ammortization", "Negative Amortization", NO_YES);
pub const INTEREST_ONLY: CategoricalField =
    CategoricalField::new("interest_only", "Interest Only", NO_YES);
pub const LUMP_SUM_PAYMENT: CategoricalField =
    CategoricalField::new("lump_sum_payment", "Lump Sum Payment", NO_YES);
pub const CONSTRUCTION_TYPE: CategoricalField =
    CategoricalField::new("construction_type", "Construction Type", TYPE_1_2);
pub const OCCUPANCY_TYPE: CategoricalField = CategoricalField::new(
    "occupancy_type",
    "Occupancy Type",
    &[("Owner", 0), ("Co-Owner", 1), ("Tenant", 2)],
);
pub const SECURED_BY: CategoricalField =
    CategoricalField::new("Secured_by", "Secured By", &[("Home", 0), ("Other", 1)]);
pub const TOTAL_UNITS: CategoricalField = CategoricalField::new(
    "total_units",
    "Total Units",
    &[("1 Unit", 0), ("2 Units", 1), ("3 Units", 2), ("4 Units", 3)],
);
pub const CREDIT_TYPE: CategoricalField = CategoricalField::new(
    "credit_type",
    "Credit Type",
    &[("Conventional", 0), ("FHA", 1), ("VA", 2), ("Other", 3)],
);
pub const CO_APPLICANT_CREDIT_TYPE: CategoricalField =
    CategoricalField::new("co-applicant_credit_type", "Co-Applicant Credit Type", NO_YES);
pub const AGE: CategoricalField = CategoricalField::new(
    "age",
    "Age Group",
    &[
        ("<25", 0),
        ("25-34", 1),
        ("35-44", 2),
        ("45-54", 3),
        ("55-64", 4),
        ("65-74", 5),
        ("75+", 6),
    ],
);
pub const SUBMISSION_OF_APPLICATION: CategoricalField = CategoricalField::new(
    "submission_of_application",
    "Submission of Application",
    &[("Not Submitted", 0), ("Submitted", 1)],
);
pub const REGION: CategoricalField = CategoricalField::new(
    "Region",
    "Region",
    &[("North", 0), ("South", 1), ("East", 2), ("West", 3)],
);
pub const SECURITY_TYPE: CategoricalField =
    CategoricalField::new("Security_Type", "Security Type", TYPE_1_2);

// ── Numeric fields ──

pub const LOAN_AMOUNT: NumericField =
    NumericField::new("loan_amount", "Loan Amount", 10_000.0, 5_000_000.0, 5_000.0);
pub const RATE_OF_INTEREST: NumericField =
    NumericField::new("rate_of_interest", "Rate of Interest (%)", 0.0, 20.0, 0.1);
pub const INTEREST_RATE_SPREAD: NumericField =
    NumericField::new("Interest_rate_spread", "Interest Rate Spread", -5.0, 10.0, 0.1);
pub const UPFRONT_CHARGES: NumericField =
    NumericField::new("Upfront_charges", "Upfront Charges", 0.0, 100_000.0, 100.0);
pub const TERM: NumericField = NumericField::new("term", "Loan Term (months)", 12.0, 480.0, 12.0);
pub const PROPERTY_VALUE: NumericField =
    NumericField::new("property_value", "Property Value", 10_000.0, 20_000_000.0, 5_000.0);
pub const INCOME: NumericField =
    NumericField::new("income", "Applicant Income", 0.0, 200_000.0, 1_000.0);
pub const CREDIT_SCORE: NumericField =
    NumericField::new("Credit_Score", "Credit Score", 300.0, 900.0, 1.0);
pub const LTV: NumericField =
    NumericField::new("LTV", "Loan-to-Value Ratio (LTV)", 0.0, 200.0, 0.1);
pub const DTIR1: NumericField = NumericField::new("dtir1", "DTI Ratio (%)", 0.0, 100.0, 1.0);

/// All categorical fields, in declaration order.
pub static CATEGORICAL_FIELDS: [&CategoricalField; 21] = [
    &LOAN_LIMIT,
    &GENDER,
    &APPROV_IN_ADV,
    &LOAN_TYPE,
    &LOAN_PURPOSE,
    &CREDIT_WORTHINESS,
    &OPEN_CREDIT,
    &BUSINESS_OR_COMMERCIAL,
    &NEG_AMMORTIZATION,
    &INTEREST_ONLY,
    &LUMP_SUM_PAYMENT,
    &CONSTRUCTION_TYPE,
    &OCCUPANCY_TYPE,
    &SECURED_BY,
    &TOTAL_UNITS,
    &CREDIT_TYPE,
    &CO_APPLICANT_CREDIT_TYPE,
    &AGE,
    &SUBMISSION_OF_APPLICATION,
    &REGION,
    &SECURITY_TYPE,
];

/// All numeric fields, in declaration order.
pub static NUMERIC_FIELDS: [&NumericField; 10] = [
    &LOAN_AMOUNT,
    &RATE_OF_INTEREST,
    &INTEREST_RATE_SPREAD,
    &UPFRONT_CHARGES,
    &TERM,
    &PROPERTY_VALUE,
    &INCOME,
    &CREDIT_SCORE,
    &LTV,
    &DTIR1,
];

pub fn categorical(name: &str) -> Option<&'static CategoricalField> {
    CATEGORICAL_FIELDS.iter().copied().find(|f| f.name == name)
}

pub fn numeric(name: &str) -> Option<&'static NumericField> {
    NUMERIC_FIELDS.iter().copied().find(|f| f.name == name)
}
