use crate::types::{ColumnStats, Dataset, ProfileReport};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

#[derive(Default)]
struct ColumnAccumulator {
    unique_values: HashSet<String>,
    empty_values: usize,
}

/// Computes aggregate statistics over an extracted dataset in one pass.
///
/// A cell counts as missing iff it is exactly the empty string. Columns are
/// identified by exact name match, so two tables sharing a column name share
/// statistics; `column_stats` keys follow first-seen order.
pub fn profile(data: &Dataset) -> ProfileReport {
    let mut total_rows = 0;
    let mut columns: IndexMap<String, ColumnAccumulator> = IndexMap::new();

    for table in data {
        total_rows += table.len();
        for row in table {
            for (column_name, cell_value) in row {
                let stats = columns.entry(column_name.clone()).or_default();
                if cell_value.is_empty() {
                    stats.empty_values += 1;
                } else {
                    stats.unique_values.insert(cell_value.clone());
                }
            }
        }
    }

    let mut missing_values = 0;
    let column_stats = columns
        .into_iter()
        .map(|(name, acc)| {
            missing_values += acc.empty_values;
            let stats = ColumnStats {
                unique_values: acc.unique_values.len(),
                empty_values: acc.empty_values,
            };
            (name, stats)
        })
        .collect();

    debug!(
        total_tables = data.len(),
        total_rows, missing_values, "profiled dataset"
    );

    ProfileReport {
        total_tables: data.len(),
        total_rows,
        missing_values,
        column_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn aggregates_across_tables_by_column_name() {
        let data = vec![
            vec![row(&[("a", "1"), ("b", "")])],
            vec![row(&[("a", "2"), ("b", "x")])],
        ];

        let report = profile(&data);
        assert_eq!(report.total_tables, 2);
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.missing_values, 1);

        let b = &report.column_stats["b"];
        assert_eq!(b.empty_values, 1);
        assert_eq!(b.unique_values, 1);
        assert_eq!(report.column_stats["a"].unique_values, 2);
    }

    #[test]
    fn missing_values_equals_sum_of_empty_counts() {
        let data = vec![vec![
            row(&[("a", ""), ("b", "")]),
            row(&[("a", "v"), ("b", "")]),
        ]];

        let report = profile(&data);
        let summed: usize = report.column_stats.values().map(|s| s.empty_values).sum();
        assert_eq!(report.missing_values, summed);
        assert_eq!(report.missing_values, 3);
    }

    #[test]
    fn whitespace_is_not_missing_and_duplicates_count_once() {
        let data = vec![vec![
            row(&[("a", " ")]),
            row(&[("a", "dup")]),
            row(&[("a", "dup")]),
        ]];

        let report = profile(&data);
        assert_eq!(report.missing_values, 0);
        // " " and "dup"
        assert_eq!(report.column_stats["a"].unique_values, 2);
    }

    #[test]
    fn column_order_follows_first_seen() {
        let data = vec![
            vec![row(&[("z", "1")])],
            vec![row(&[("a", "2"), ("z", "3")])],
        ];

        let report = profile(&data);
        let names: Vec<&String> = report.column_stats.keys().collect();
        assert_eq!(names, ["z", "a"]);
    }

    #[test]
    fn empty_dataset_profiles_to_zeroes() {
        let report = profile(&Vec::new());
        assert_eq!(report, ProfileReport::default());
    }
}
