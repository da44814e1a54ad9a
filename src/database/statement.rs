//! Prepared statements
//!
//! A [`Statement`] is a SQL string plus the raw JSON values bound to its
//! placeholders. Binding is positional and replaces any earlier binding.

use serde_json::Value;

/// A prepared statement awaiting execution
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    /// Prepare a statement with no bound values
    pub fn prepare(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind positional values, replacing any previous binding
    pub fn bind<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.params = params.into_iter().collect();
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}
