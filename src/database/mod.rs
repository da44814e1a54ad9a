//! # Database Layer
//!
//! The gateway talks to storage only through the [`Database`] trait. The
//! engine behind it owns query planning, transactions and consistency;
//! this crate ships an embedded SQLite implementation.
//!
//! # Operations
//!
//! - `run` - one prepared statement, rows plus execution metadata
//! - `exec` - raw SQL, no binding
//! - `batch` - ordered statements applied atomically

mod binding;
mod errors;
mod result;
mod sqlite;
mod statement;

use async_trait::async_trait;

pub use binding::{bind_value, bind_values, column_to_json};
pub use errors::{DbError, DbResult};
pub use result::{ExecResult, StatementMeta, StatementResult};
pub use sqlite::{SqliteDatabase, IN_MEMORY};
pub use statement::Statement;

/// A database the gateway can forward statements to
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one prepared statement
    async fn run(&self, statement: Statement) -> DbResult<StatementResult>;

    /// Execute raw SQL without parameter binding
    async fn exec(&self, sql: String) -> DbResult<ExecResult>;

    /// Execute statements in order as one atomic unit
    async fn batch(&self, statements: Vec<Statement>) -> DbResult<Vec<StatementResult>>;
}
