use crate::types::{Dataset, Row, Table};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts one table structure into normalized rows.
///
/// The first `tr` is the header row; its `th` cells become column names. Each
/// subsequent `tr` becomes one row keyed by those names, with missing trailing
/// cells padded as empty strings and excess cells dropped. A table with no
/// rows at all degrades to an empty table.
fn extract_table(table: ElementRef<'_>) -> Table {
    let tr_selector = Selector::parse("tr").unwrap();
    let th_selector = Selector::parse("th").unwrap();
    let td_selector = Selector::parse("td").unwrap();

    let rows: Vec<ElementRef<'_>> = table.select(&tr_selector).collect();
    let Some((header_row, data_rows)) = rows.split_first() else {
        debug!("table has no rows; yielding empty table");
        return Vec::new();
    };

    let headers: Vec<String> = header_row.select(&th_selector).map(cell_text).collect();

    data_rows
        .iter()
        .map(|tr| {
            let cells: Vec<String> = tr.select(&td_selector).map(cell_text).collect();
            let mut row = Row::new();
            for (index, header) in headers.iter().enumerate() {
                row.insert(header.clone(), cells.get(index).cloned().unwrap_or_default());
            }
            row
        })
        .collect()
}

/// Extracts every `<table>` in the document, in document order.
///
/// Read-only traversal; malformed structures degrade to empty tables rather
/// than failing.
pub fn extract_tables(html: &str) -> Dataset {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").unwrap();

    let dataset: Dataset = document
        .select(&table_selector)
        .map(extract_table)
        .collect();

    info!(
        "extracted {} tables ({} rows total)",
        dataset.len(),
        dataset.iter().map(Vec::len).sum::<usize>()
    );
    dataset
}
