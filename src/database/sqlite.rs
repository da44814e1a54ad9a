//! # SQLite backend
//!
//! Embedded implementation of [`Database`] on top of `rusqlite`.
//!
//! A single connection sits behind a mutex; every call runs on the blocking
//! pool so SQLite never stalls the async workers.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::{Map, Value};

use super::binding::{bind_values, column_to_json};
use super::errors::{DbError, DbResult};
use super::result::{ExecResult, StatementMeta, StatementResult};
use super::statement::Statement;
use super::Database;

/// Path that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

const SERVED_BY: &str = "sqlgate-sqlite";

/// SQLite-backed database
#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    /// Open a database file, or an in-memory database for `:memory:`
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = if path.as_os_str() == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Ok(Self::from_connection(conn))
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Connection) -> DbResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| DbError::Worker("connection lock poisoned".to_string()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| DbError::Worker(e.to_string()))?
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn run(&self, statement: Statement) -> DbResult<StatementResult> {
        self.with_connection(move |conn| run_statement(conn, &statement))
            .await
    }

    async fn exec(&self, sql: String) -> DbResult<ExecResult> {
        self.with_connection(move |conn| exec_lines(conn, &sql)).await
    }

    async fn batch(&self, statements: Vec<Statement>) -> DbResult<Vec<StatementResult>> {
        self.with_connection(move |conn| {
            // Dropping an uncommitted transaction rolls it back.
            let tx = conn.transaction()?;
            let mut results = Vec::with_capacity(statements.len());
            for statement in &statements {
                results.push(run_statement(&tx, statement)?);
            }
            tx.commit()?;
            Ok(results)
        })
        .await
    }
}

fn run_statement(conn: &Connection, statement: &Statement) -> DbResult<StatementResult> {
    let started = Instant::now();

    if statement.sql().trim().is_empty() {
        return Err(DbError::EmptyQuery);
    }
    let values = bind_values(statement.params())?;
    let changes_before = total_changes(conn)?;

    let mut prepared = conn.prepare(statement.sql())?;
    let readonly = prepared.readonly();
    let columns: Vec<String> = prepared
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = prepared.query(params_from_iter(values.iter()))?;
    let mut results = Vec::new();
    while let Some(row) = rows.next()? {
        let mut object = Map::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            let value: SqlValue = row.get(idx)?;
            object.insert(name.clone(), column_to_json(value));
        }
        results.push(Value::Object(object));
    }
    drop(rows);
    drop(prepared);

    // `changes()` keeps the last DML count across DDL; diff the running total.
    let changes = if readonly {
        0
    } else {
        total_changes(conn)?.saturating_sub(changes_before)
    };
    let meta = StatementMeta {
        served_by: SERVED_BY.to_string(),
        duration: elapsed_ms(started),
        changes,
        last_row_id: conn.last_insert_rowid(),
        changed_db: changes > 0,
        size_after: database_size(conn)?,
        rows_read: results.len() as u64,
        rows_written: changes,
    };

    Ok(StatementResult::new(meta, results))
}

/// Raw exec: one statement per line, no transaction
fn exec_lines(conn: &Connection, sql: &str) -> DbResult<ExecResult> {
    let started = Instant::now();
    let mut count = 0u64;

    for (idx, line) in sql.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        conn.execute_batch(line).map_err(|e| DbError::Exec {
            line: idx + 1,
            statement: line.to_string(),
            message: e.to_string(),
        })?;
        count += 1;
    }

    if count == 0 {
        return Err(DbError::EmptyQuery);
    }

    Ok(ExecResult {
        count,
        duration: elapsed_ms(started),
    })
}

fn total_changes(conn: &Connection) -> DbResult<u64> {
    let total: i64 = conn.query_row("SELECT total_changes()", [], |row| row.get(0))?;
    Ok(total.max(0) as u64)
}

fn database_size(conn: &Connection) -> DbResult<u64> {
    let page_count: i64 = conn.pragma_query_value(None, "page_count", |row| row.get(0))?;
    let page_size: i64 = conn.pragma_query_value(None, "page_size", |row| row.get(0))?;
    Ok((page_count.max(0) as u64) * (page_size.max(0) as u64))
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
