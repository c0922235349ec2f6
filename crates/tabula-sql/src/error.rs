//! Query error types.

use thiserror::Error;

/// Errors raised while parsing or evaluating a query.
///
/// Every variant is fatal for the query that raised it; no partial result is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query text does not follow `select <cols> from <tables> [where <pred>]`.
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// A table named in the FROM clause is not in the database.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A column referenced by SELECT or WHERE is not in the table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Row count requested on a table with no columns.
    #[error("Table has no columns, row count is undefined")]
    EmptyTable,

    /// Two columns of one table share a name.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column's length differs from the other columns of its table.
    #[error("Column {column} has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        /// Offending column.
        column: String,
        /// Row count of the preceding columns.
        expected: usize,
        /// Row count of the offending column.
        actual: usize,
    },
}

impl QueryError {
    /// Shorthand for a [`QueryError::MalformedQuery`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        QueryError::MalformedQuery(msg.into())
    }
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
