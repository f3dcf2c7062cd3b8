use crate::config::TransformConfig;
use crate::types::{Dataset, Table};
use std::collections::HashSet;
use tracing::debug;

/// Replaces cells equal to the empty string with `default_value`, in place.
fn fill_missing_values(table: &mut Table, default_value: &str) {
    for row in table.iter_mut() {
        for cell in row.values_mut() {
            if cell.is_empty() {
                *cell = default_value.to_string();
            }
        }
    }
}

/// Lowercases every cell value in place. All cells are strings at this stage,
/// so the fold applies uniformly to every column.
fn convert_text_to_lowercase(table: &mut Table) {
    for row in table.iter_mut() {
        for cell in row.values_mut() {
            *cell = cell.to_lowercase();
        }
    }
}

/// Drops duplicate rows, keeping the first occurrence and preserving relative
/// order among survivors. Rows compare by full structural equality: same
/// column names, same values, same order.
fn remove_duplicate_rows(table: Table) -> Table {
    let mut seen_rows = HashSet::new();
    let mut unique_rows = Vec::with_capacity(table.len());

    for row in table {
        // IndexMap serializes in insertion order, so the JSON form is a
        // faithful structural identity for the row.
        let key = serde_json::to_string(&row).expect("row serializes to JSON");
        if seen_rows.insert(key) {
            unique_rows.push(row);
        }
    }

    unique_rows
}

/// Applies the configured cleaning stages to each table.
///
/// Stage order is fixed (fill, lowercase, dedupe) and not reorderable;
/// disabled stages pass the table through untouched.
pub fn transform(data: Dataset, config: &TransformConfig) -> Dataset {
    data.into_iter()
        .map(|mut table| {
            if config.fill_missing_values {
                fill_missing_values(&mut table, &config.default_value);
            }
            if config.convert_text_to_lowercase {
                convert_text_to_lowercase(&mut table);
            }
            if config.remove_duplicate_rows {
                let before = table.len();
                table = remove_duplicate_rows(table);
                if table.len() < before {
                    debug!("dropped {} duplicate rows", before - table.len());
                }
            }
            table
        })
        .collect()
}
