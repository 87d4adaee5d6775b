//! CSV export of table views.
//!
//! Cells are written as rendered, so dates use the column's format and
//! list cells put one item per line inside a single quoted field.

use std::io::Write;

use crate::column::Column;
use crate::error::Result;
use crate::record::Record;
use crate::table::Table;

/// Writes the current page of `table`, with a header row.
pub fn write_csv<R: Record, W: Write>(table: &Table<R>, writer: W) -> Result<()> {
    write_rows(table.columns(), &table.derived_rows(), writer)
}

/// Writes every filtered and sorted row of `table`, ignoring pagination.
pub fn write_csv_all<R: Record, W: Write>(table: &Table<R>, writer: W) -> Result<()> {
    write_rows(table.columns(), &table.sorted_rows(), writer)
}

fn write_rows<R: Record, W: Write>(columns: &[Column], rows: &[&R], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(Column::header_label))?;
    for row in rows {
        csv.write_record(
            columns
                .iter()
                .map(|column| column.render_record(*row).join("\n")),
        )?;
    }
    csv.flush()?;
    log::debug!("exported {} rows", rows.len());
    Ok(())
}
