//! Shared test fixtures: a small ensemble over the loan feature schema.

use lendscore_core::FeatureRecord;
use lendscore_core::schema::column_names;
use serde_json::json;

/// Two trees over the 31 loan columns:
///   tree 0: Credit_Score < 600 ? 1.2 : (LTV < 90 ? -0.8 : 0.4)
///   tree 1: Credit_Worthiness < 0.5 ? -0.3 : 0.9
pub fn loan_ensemble_json() -> String {
    let names: Vec<&str> = column_names().collect();
    json!({
        "objective": "binary:logistic",
        "base_score": 0.5,
        "feature_names": names,
        "trees": [
            {
                "nodeid": 0, "split": "Credit_Score", "split_condition": 600.0,
                "yes": 1, "no": 2, "missing": 1,
                "children": [
                    { "nodeid": 1, "leaf": 1.2 },
                    {
                        "nodeid": 2, "split": "LTV", "split_condition": 90.0,
                        "yes": 3, "no": 4, "missing": 3,
                        "children": [
                            { "nodeid": 3, "leaf": -0.8 },
                            { "nodeid": 4, "leaf": 0.4 }
                        ]
                    }
                ]
            },
            {
                "nodeid": 0, "split": "Credit_Worthiness", "split_condition": 0.5,
                "yes": 1, "no": 2, "missing": 1,
                "children": [
                    { "nodeid": 1, "leaf": -0.3 },
                    { "nodeid": 2, "leaf": 0.9 }
                ]
            }
        ]
    })
    .to_string()
}

/// Encoded reference application (good credit, LTV 80).
pub fn reference_record() -> FeatureRecord {
    FeatureRecord::from_values(vec![
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 200_000.0, 5.0, 1.0, 0.0, 360.0, 0.0, 0.0, 0.0,
        250_000.0, 0.0, 0.0, 0.0, 0.0, 50_000.0, 0.0, 750.0, 0.0, 2.0, 1.0, 80.0, 0.0, 0.0, 30.0,
    ])
}

/// Copy of `record` with column `name` set to `value`.
pub fn with_value(record: &FeatureRecord, name: &str, value: f64) -> FeatureRecord {
    let (idx, _) = lendscore_core::schema::column(name).expect("known column");
    let mut values = record.values().to_vec();
    values[idx] = value;
    FeatureRecord::from_values(values)
}
