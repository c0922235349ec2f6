//! Rendering tables as CSV.

use std::io::{self, Write};

use crate::table::Table;

/// Writes `table` as CSV: the header line, then one line per row.
///
/// Fields are quoted only when they contain a delimiter, quote or newline, so
/// the output can be read back by the storage loader. A table without columns
/// renders nothing.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> csv::Result<()> {
    if table.num_columns() == 0 {
        return Ok(());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders `table` to a CSV string.
pub fn to_csv_string(table: &Table) -> csv::Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    let text = String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(text)
}
