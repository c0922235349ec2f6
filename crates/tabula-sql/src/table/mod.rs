//! Columnar table model.
//!
//! A [`Table`] is an ordered list of named columns of string cells. All
//! columns of a table have the same length, and row `i` across all columns is
//! one logical row. Tables are immutable: every transformation returns a new
//! table and leaves its input untouched.

mod database;

pub use database::Database;

use std::collections::HashSet;
use std::fmt;

use crate::error::{QueryError, QueryResult};

/// A named column of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    values: Vec<String>,
}

impl Column {
    /// Creates a column from a name and its cells, top to bottom.
    pub fn new<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cells of this column.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the cell at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn with_values(&self, values: Vec<String>) -> Self {
        Self {
            name: self.name.clone(),
            values,
        }
    }
}

/// An immutable table of equal-length, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table, checking that column names are unique and that all
    /// columns have the same length.
    pub fn new(columns: Vec<Column>) -> QueryResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(QueryError::DuplicateColumn(column.name().to_string()));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(QueryError::ColumnLengthMismatch {
                    column: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    /// Creates a table from `(name, cells)` pairs.
    pub fn from_columns<N, V, S>(columns: impl IntoIterator<Item = (N, V)>) -> QueryResult<Self>
    where
        N: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            columns
                .into_iter()
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    /// Creates a table with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns true if the table has a column called `name`.
    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the shared length of the columns.
    ///
    /// Fails with [`QueryError::EmptyTable`] when the table has no columns,
    /// since the row count is then undefined.
    pub fn row_count(&self) -> QueryResult<usize> {
        self.columns
            .first()
            .map(Column::len)
            .ok_or(QueryError::EmptyTable)
    }

    /// Returns the cells of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        self.columns.iter().map(|c| c.get(index)).collect()
    }

    /// Iterates over the rows of the table. A table without columns has no rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        let count = self.row_count().unwrap_or(0);
        (0..count).filter_map(move |i| self.row(i))
    }

    /// Returns a table where every row is repeated `n` times in a block:
    /// row 0 `n` times, then row 1 `n` times, and so on.
    pub fn repeat_each_row_block(&self, n: usize) -> Table {
        self.map_columns(|values| {
            values
                .iter()
                .flat_map(|v| std::iter::repeat(v).take(n))
                .cloned()
                .collect()
        })
    }

    /// Returns a table where the whole row sequence is repeated `n` times
    /// end to end.
    pub fn repeat_whole_sequence(&self, n: usize) -> Table {
        self.map_columns(|values| {
            let mut out = Vec::with_capacity(values.len() * n);
            for _ in 0..n {
                out.extend_from_slice(values);
            }
            out
        })
    }

    /// Returns a table holding only the rows at `indices`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn take(&self, indices: &[usize]) -> Table {
        self.map_columns(|values| indices.iter().map(|&i| values[i].clone()).collect())
    }

    /// Places the columns of `other` after the columns of `self`.
    ///
    /// Both tables must have the same row count and disjoint column names.
    pub fn concat_columns(&self, other: &Table) -> QueryResult<Table> {
        Table::new(
            self.columns
                .iter()
                .chain(other.columns.iter())
                .cloned()
                .collect(),
        )
    }

    fn map_columns(&self, f: impl Fn(&[String]) -> Vec<String>) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| c.with_values(f(c.values.as_slice())))
                .collect(),
        }
    }
}

/// Renders the table as CSV, exactly as [`write_csv`](crate::render::write_csv) does.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::render::to_csv_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years() -> Table {
        Table::from_columns([("m.year", vec!["1997", "2000"])]).unwrap()
    }

    #[test]
    fn test_row_count() {
        let table = Table::from_columns([("m.year", vec!["1997", "2003", "2010"])]).unwrap();
        assert_eq!(table.row_count().unwrap(), 3);

        let table = Table::from_columns([("o.year", vec!["2010", "2003", "1997", "1997"])]).unwrap();
        assert_eq!(table.row_count().unwrap(), 4);
    }

    #[test]
    fn test_row_count_without_columns() {
        assert_eq!(Table::empty().row_count(), Err(QueryError::EmptyTable));
    }

    #[test]
    fn test_zero_rows_is_not_empty_table() {
        let table = Table::from_columns([("a", Vec::<String>::new())]).unwrap();
        assert_eq!(table.row_count().unwrap(), 0);
        assert_eq!(table.rows().count(), 0);
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let err = Table::from_columns([("a", vec!["1", "2"]), ("b", vec!["1"])]).unwrap_err();
        assert_eq!(
            err,
            QueryError::ColumnLengthMismatch {
                column: "b".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = Table::from_columns([("a", vec!["1"]), ("a", vec!["2"])]).unwrap_err();
        assert_eq!(err, QueryError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_repeat_each_row_block() {
        let table = years().repeat_each_row_block(2);
        assert_eq!(
            table.column("m.year").unwrap().values(),
            ["1997", "1997", "2000", "2000"]
        );
    }

    #[test]
    fn test_repeat_whole_sequence() {
        let table = years().repeat_whole_sequence(2);
        assert_eq!(
            table.column("m.year").unwrap().values(),
            ["1997", "2000", "1997", "2000"]
        );
    }

    #[test]
    fn test_repeat_does_not_mutate_input() {
        let table = years();
        let _ = table.repeat_each_row_block(3);
        let _ = table.repeat_whole_sequence(3);
        assert_eq!(table, years());
    }

    #[test]
    fn test_repeat_zero_times() {
        let table = years().repeat_whole_sequence(0);
        assert_eq!(table.row_count().unwrap(), 0);
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["m.year"]);
    }

    #[test]
    fn test_take() {
        let table = Table::from_columns([("a", vec!["x", "y", "z"]), ("b", vec!["1", "2", "3"])]).unwrap();
        let taken = table.take(&[0, 2]);
        assert_eq!(taken.row(0).unwrap(), ["x", "1"]);
        assert_eq!(taken.row(1).unwrap(), ["z", "3"]);
        assert!(taken.row(2).is_none());
    }

    #[test]
    fn test_display() {
        let table = Table::from_columns([("a", vec!["x", "y"]), ("b", vec!["1", "2"])]).unwrap();
        assert_eq!(table.to_string(), "a,b\nx,1\ny,2\n");
    }

    #[test]
    fn test_display_quotes_like_csv_render() {
        let table = Table::from_columns([
            ("m.title", vec!["Crouching Tiger, Hidden Dragon"]),
            ("m.year", vec!["2000"]),
        ])
        .unwrap();
        assert_eq!(
            table.to_string(),
            "m.title,m.year\n\"Crouching Tiger, Hidden Dragon\",2000\n"
        );
        assert_eq!(table.to_string(), crate::render::to_csv_string(&table).unwrap());
        assert_eq!(Table::empty().to_string(), "");
    }
}
