//! Output formatting utilities for CLI commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use shoplab_db::QueryTable;

/// Rows shown per query result.
pub const PREVIEW_ROWS: usize = 10;

/// Build a table with the CLI's standard styling
pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    // Add header row with styling
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    table
}

/// Table of the first [`PREVIEW_ROWS`] rows of a query result.
pub fn query_preview(result: &QueryTable) -> Table {
    let headers: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    let rows = result
        .head(PREVIEW_ROWS)
        .rows
        .iter()
        .map(|row| row.iter().map(|value| value.display()).collect())
        .collect();
    build_table(&headers, rows)
}

/// Print pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplab_db::DbValue;

    #[test]
    fn test_query_preview_truncates() {
        let result = QueryTable {
            columns: vec!["ym".to_string(), "revenue".to_string()],
            rows: (1..=12)
                .map(|m| vec![DbValue::from(format!("2024-{m:02}").as_str()), DbValue::from(1.5)])
                .collect(),
        };

        let rendered = query_preview(&result).to_string();
        assert!(rendered.contains("revenue"));
        assert!(rendered.contains("2024-10"));
        assert!(!rendered.contains("2024-11"));
        assert!(rendered.contains("1.50"));
    }
}
