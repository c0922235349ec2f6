//! Storage error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::QueryError;

/// Errors raised while loading tables from disk.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a file or directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid CSV, or a row has the wrong number of fields.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file decoded but does not form a valid table.
    #[error("Invalid table: {0}")]
    InvalidTable(#[from] QueryError),

    /// Loading a particular table file failed.
    #[error("Failed to load {}: {source}", path.display())]
    File {
        /// Table file.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<StorageError>,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Storage result type.
pub type StorageResult<T> = Result<T, StorageError>;
