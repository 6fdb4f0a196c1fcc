//! Collect raw field values from a JSON file and `--set` overrides.

use std::path::Path;

use anyhow::{Context, bail};
use lendscore_core::schema::column;
use lendscore_core::{Column, RawInputs, RawValue};

/// Read `path` (if given) and apply `--set FIELD=VALUE` assignments on top.
pub fn read_inputs(path: Option<&Path>, assignments: &[String]) -> anyhow::Result<RawInputs> {
    let mut inputs = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RawInputs::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RawInputs::new(),
    };

    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        inputs.insert(name, value);
    }
    Ok(inputs)
}

/// Parse `FIELD=VALUE`, reading VALUE as a number for numeric fields and as
/// a label otherwise.
pub fn parse_assignment(assignment: &str) -> anyhow::Result<(&str, RawValue)> {
    let Some((name, value)) = assignment.split_once('=') else {
        bail!("expected FIELD=VALUE, got {assignment:?}");
    };
    let name = name.trim();

    let value = match column(name) {
        Some((_, Column::Numeric(_))) => RawValue::Number(
            value
                .trim()
                .parse()
                .with_context(|| format!("{name}: {value:?} is not a number"))?,
        ),
        Some((_, Column::Categorical(_))) => RawValue::Label(value.to_string()),
        None => bail!("unknown field {name:?}"),
    };
    Ok((name, value))
}
