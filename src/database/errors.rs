//! # Database Errors
//!
//! Error types for the database layer. Display strings carry the same
//! `D1_*` prefixes the hosted service uses, so callers see familiar text.

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database errors
#[derive(Debug, Error)]
pub enum DbError {
    /// SQLite rejected the statement (prepare, bind or step)
    #[error("D1_ERROR: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A raw bound value has no SQL representation
    #[error("D1_TYPE_ERROR: Type '{kind}' not supported for value '{value}'")]
    UnsupportedType { kind: &'static str, value: String },

    /// One line of a raw exec failed
    #[error("D1_EXEC_ERROR: Error in line {line}: {statement}: {message}")]
    Exec {
        line: usize,
        statement: String,
        message: String,
    },

    /// The query string contained nothing to run
    #[error("D1_ERROR: No SQL statements detected.")]
    EmptyQuery,

    /// The blocking worker running SQLite failed
    #[error("D1_ERROR: database worker failed: {0}")]
    Worker(String),
}
