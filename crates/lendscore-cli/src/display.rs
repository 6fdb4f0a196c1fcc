//! Terminal output: field catalog, feature record cards, verdicts.

use lendscore_core::catalog::{CATEGORICAL_FIELDS, NUMERIC_FIELDS};
use lendscore_core::schema::column;
use lendscore_core::{Column, FeatureRecord, Verdict};
use serde::Serialize;

// ── Record sections ──

const APPLICANT: &[&str] = &["Gender", "income", "co-applicant_credit_type", "age", "Region"];

const LOAN: &[&str] = &[
    "loan_limit",
    "approv_in_adv",
    "loan_type",
    "loan_purpose",
    "business_or_commercial",
    "loan_amount",
    "rate_of_interest",
    "Interest_rate_spread",
    "Upfront_charges",
    "term",
    "Neg_ammortization",
    "interest_only",
    "lump_sum_payment",
    "submission_of_application",
];

const PROPERTY: &[&str] = &[
    "property_value",
    "construction_type",
    "occupancy_type",
    "Secured_by",
    "total_units",
    "LTV",
    "Security_Type",
];

const CREDIT: &[&str] = &[
    "Credit_Worthiness",
    "open_credit",
    "credit_type",
    "Credit_Score",
    "dtir1",
];

const SECTIONS: &[(&str, &[&str])] = &[
    ("Applicant", APPLICANT),
    ("Loan", LOAN),
    ("Property", PROPERTY),
    ("Credit", CREDIT),
];

/// Print every input field: labels and codes, or range and step.
pub fn print_fields() {
    println!("Categorical fields");
    for field in CATEGORICAL_FIELDS {
        let labels: Vec<String> = field
            .labels
            .iter()
            .map(|(label, code)| format!("{label}={code}"))
            .collect();
        println!("  {:<26} {}", field.name, labels.join(", "));
    }
    println!();

    println!("Numeric fields");
    for field in NUMERIC_FIELDS {
        println!(
            "  {:<26} [{}, {}] step {}",
            field.name, field.min, field.max, field.step
        );
    }
}

/// Print a feature record as a card grouped by section, in classifier order
/// within each section.
pub fn print_record(record: &FeatureRecord) {
    println!("=== Feature record ({} columns) ===", record.len());
    println!();
    for (header, names) in SECTIONS {
        println!("{header}");
        for &name in *names {
            if let Some(line) = format_line(record, name) {
                println!("{line}");
            }
        }
        println!();
    }
}

/// Print the record as a one-row Arrow table.
pub fn print_table(record: &FeatureRecord) -> anyhow::Result<()> {
    let batch = record.to_record_batch()?;
    println!("{}", arrow::util::pretty::pretty_format_batches(&[batch])?);
    Ok(())
}

pub fn print_verdict(verdict: Verdict) {
    println!("Prediction: Applicant is {verdict}");
}

#[derive(Serialize)]
struct VerdictOutput {
    verdict: Verdict,
    label: &'static str,
    class: u8,
}

pub fn print_verdict_json(verdict: Verdict) -> anyhow::Result<()> {
    let out = VerdictOutput {
        verdict,
        label: verdict.label(),
        class: verdict.code(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn format_line(record: &FeatureRecord, name: &str) -> Option<String> {
    let (_, col) = column(name)?;
    let value = record.get(name)?;
    let line = match col {
        Column::Categorical(field) => {
            let label = field.decode(value as u32).unwrap_or("?");
            format!("  {:<26} {:<10} {}", field.title, value as i64, label)
        }
        Column::Numeric(field) => format!("  {:<26} {}", field.title, value),
    };
    Some(line)
}
