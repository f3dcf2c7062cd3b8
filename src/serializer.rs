use crate::types::Dataset;

/// Renders transformed tables to CSV text: one block per table, blocks joined
/// by a blank line. The header line is the first row's column names joined by
/// commas, unquoted; each data value is wrapped in double quotes.
///
/// Known limitation carried over from the original exporter: embedded quotes,
/// commas, and newlines inside cell values are not escaped.
pub fn to_csv(data: &Dataset) -> String {
    data.iter()
        .map(|table| {
            let Some(first_row) = table.first() else {
                return String::new();
            };

            let headers = first_row
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");

            let rows = table
                .iter()
                .map(|row| {
                    row.values()
                        .map(|value| format!("\"{}\"", value))
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect::<Vec<_>>()
                .join("\n");

            format!("{}\n{}", headers, rows)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
