//! ASCII table rendering.

use crate::report::ReportRow;
use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::{Cell, Table};

/// Render rows as a bordered ASCII table with a heading line.
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(ReportRow::COLUMNS.to_vec());

    for row in rows {
        table.add_row(row.cells().into_iter().map(Cell::new).collect::<Vec<_>>());
    }

    format!("{table}\n")
}
