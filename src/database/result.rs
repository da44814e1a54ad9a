//! Result envelopes returned by the database layer.
//!
//! These mirror what the hosted service hands back, so clients written
//! against it can talk to this gateway unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Execution metadata attached to every statement result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementMeta {
    /// Name of the backend that ran the statement
    pub served_by: String,
    /// Wall time in milliseconds
    pub duration: f64,
    /// Rows inserted, updated or deleted
    pub changes: u64,
    pub last_row_id: i64,
    pub changed_db: bool,
    /// Database size in bytes after the statement
    pub size_after: u64,
    pub rows_read: u64,
    pub rows_written: u64,
}

/// Result of running one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    pub success: bool,
    pub meta: StatementMeta,
    /// One JSON object per row, keyed by column name
    pub results: Vec<Value>,
}

impl StatementResult {
    pub fn new(meta: StatementMeta, results: Vec<Value>) -> Self {
        Self {
            success: true,
            meta,
            results,
        }
    }
}

/// Result of a raw exec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Number of statements executed
    pub count: u64,
    /// Wall time in milliseconds
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statement_result_shape() {
        let result = StatementResult::new(StatementMeta::default(), vec![json!({"id": 1})]);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["results"][0]["id"], json!(1));
        assert!(value["meta"].get("last_row_id").is_some());
        assert!(value["meta"].get("rows_written").is_some());
    }
}
