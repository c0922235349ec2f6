//! Loading tables from flat CSV files.
//!
//! A database directory holds one file per table. The first line of each file
//! is the header of column names; every following line is a row. The table is
//! named after the file without its extension, so `movies.csv` becomes the
//! table `movies`.

mod error;

pub use error::{StorageError, StorageResult};

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::table::{Column, Database, Table};

/// Default extension of table files.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Loads every `*.<extension>` file in `dir` into a database.
///
/// Files are loaded in file-name order.
pub fn load_database(dir: &Path, extension: &str) -> StorageResult<Database> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| StorageError::io(dir, e))? {
        let path = entry.map_err(|e| StorageError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut database = Database::new();
    for path in paths {
        let Some(name) = table_name(&path) else {
            continue;
        };
        let table = read_table_file(&path)?;
        debug!(
            "Loaded table {} ({} columns, {} rows) from {}",
            name,
            table.num_columns(),
            table.row_count().unwrap_or(0),
            path.display()
        );
        database.insert(name, table);
    }

    Ok(database)
}

/// Reads one table file.
pub fn read_table_file(path: &Path) -> StorageResult<Table> {
    let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
    read_table(file).map_err(|source| StorageError::File {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

/// Reads a table from CSV text with a header line.
///
/// Empty input yields a table without columns; a header alone yields a table
/// without rows.
pub fn read_table<R: Read>(reader: R) -> StorageResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record = record?;
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let table = Table::new(
        headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )?;
    Ok(table)
}

fn table_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}
