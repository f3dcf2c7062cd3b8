use crate::types::{Row, RuleSet, ValidationReport};
use indexmap::IndexMap;
use tracing::debug;

/// Compares a cell against a rule's bounds.
///
/// Coercion is explicit: a cell that parses as `f64` compares numerically;
/// anything else compares lexically against the bounds' display form.
fn out_of_range(value: &str, min: f64, max: f64) -> bool {
    match value.parse::<f64>() {
        Ok(number) => number < min || number > max,
        Err(_) => value < min.to_string().as_str() || value > max.to_string().as_str(),
    }
}

/// Checks each row against the rule set, producing one diagnostics entry per
/// row. Row indices in messages are 1-based and reset per call.
///
/// Per column, the required check short-circuits the range check, so a column
/// records at most one message per row. Columns without rules are never
/// checked, and rows are validated independently.
pub fn validate(rows: &[Row], rules: &RuleSet) -> ValidationReport {
    let report: ValidationReport = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut row_results = IndexMap::new();

            for (column_name, rule) in rules {
                let value = row.get(column_name);

                if rule.required && value.map_or(true, |v| v.is_empty()) {
                    row_results.insert(
                        column_name.clone(),
                        format!(
                            "Value is required (Row: {}, Column: {})",
                            row_index + 1,
                            column_name
                        ),
                    );
                } else if let (Some(min), Some(max)) = (rule.min, rule.max) {
                    if value.is_some_and(|v| out_of_range(v, min, max)) {
                        row_results.insert(
                            column_name.clone(),
                            format!(
                                "Value should be between {} and {} (Row: {}, Column: {})",
                                min,
                                max,
                                row_index + 1,
                                column_name
                            ),
                        );
                    }
                }
            }

            row_results
        })
        .collect();

    let violations: usize = report.iter().map(IndexMap::len).sum();
    debug!(rows = rows.len(), violations, "validated rows");
    report
}
