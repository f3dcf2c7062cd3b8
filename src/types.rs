use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One record of column-name-to-cell-value pairs. Insertion order follows the
/// originating header order and is preserved across all rows of a table.
pub type Row = IndexMap<String, String>;

/// Ordered sequence of rows sharing one header-derived column set.
pub type Table = Vec<Row>;

/// All tables extracted from a single document. Tables are independent.
pub type Dataset = Vec<Table>;

/// Per-column data-quality counters. Uniqueness is by exact string equality
/// across the entire dataset, not per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub unique_values: usize,
    pub empty_values: usize,
}

/// Aggregate statistics over an extracted dataset.
///
/// `column_stats` keys iterate in first-seen order across tables and rows, and
/// `missing_values` always equals the sum of the per-column empty counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub total_tables: usize,
    pub total_rows: usize,
    pub missing_values: usize,
    pub column_stats: IndexMap<String, ColumnStats>,
}

/// A per-column constraint checked against transformed data. The range check
/// only applies when both bounds are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Rule mapping keyed by column name; iteration order is check order.
pub type RuleSet = IndexMap<String, ValidationRule>;

/// One entry per validated row, mapping column name to a human-readable
/// violation message. Columns with no violation are absent from the entry.
pub type ValidationReport = Vec<IndexMap<String, String>>;
