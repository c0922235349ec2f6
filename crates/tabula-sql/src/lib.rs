//! # tabula-sql
//!
//! Query parser, relational operators and flat-file storage for Tabula.
//!
//! This crate implements:
//! - An immutable, columnar in-memory table model
//! - A parser for the `select .. from .. [where ..]` query language
//! - Cartesian join, predicate filtering and projection
//! - Loading a directory of CSV files into a database, and rendering tables
//!   back to CSV
//!
//! # Example
//!
//! ```
//! use tabula_sql::{Database, QueryEngine, Table};
//!
//! let mut db = Database::new();
//! db.insert("m", Table::from_columns([("m.year", vec!["1997", "2003"])]).unwrap());
//! db.insert("o", Table::from_columns([("o.year", vec!["2010", "2000"])]).unwrap());
//!
//! let engine = QueryEngine::new(db);
//! let result = engine.execute("select * from m,o").unwrap();
//! assert_eq!(result.row_count().unwrap(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types shared by the query pipeline
pub mod error;

/// Columnar table model and the database of named tables
pub mod table;

/// Query text parser
pub mod parser;

/// Predicate evaluation, relational operators and the query engine
pub mod executor;

/// Loading tables from flat files
pub mod storage;

/// Rendering tables as CSV
pub mod render;

pub use error::{QueryError, QueryResult};
pub use executor::{evaluate, execute, Operand, Operator, Predicate, QueryEngine};
pub use parser::{Parser, Projection, QueryPlan};
pub use render::{to_csv_string, write_csv};
pub use storage::{load_database, StorageError, StorageResult};
pub use table::{Column, Database, Table};
