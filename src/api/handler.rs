//! API handler
//!
//! Turns request bodies into database calls. Each method is one
//! independent unit of work; the handler holds no per-request state.
//!
//! Only the single-statement path coerces parameters. Batch parameters are
//! handed to the database raw, so the backend's own binding rules apply.

use std::sync::Arc;

use serde_json::Value;

use crate::database::{Database, ExecResult, Statement, StatementResult};

use super::coerce::coerce_all;
use super::errors::ProxyResult;
use super::request::{parse_body, BatchRequest, ExecRequest, QueryRequest};

/// Executes gateway operations against a database
#[derive(Clone)]
pub struct ApiHandler {
    database: Arc<dyn Database>,
}

impl ApiHandler {
    pub fn new(database: Arc<dyn Database>) -> Self {
        Self { database }
    }

    /// Run one statement, binding coerced params when present
    pub async fn run_query(&self, body: &[u8]) -> ProxyResult<StatementResult> {
        let request: QueryRequest = parse_body(body)?;

        let mut statement = Statement::prepare(request.query);
        if let Some(params) = request.params {
            statement = statement.bind(coerce_all(&params).into_iter().map(Value::from));
        }

        Ok(self.database.run(statement).await?)
    }

    /// Run raw SQL, unbound
    pub async fn exec(&self, body: &[u8]) -> ProxyResult<ExecResult> {
        let request: ExecRequest = parse_body(body)?;
        Ok(self.database.exec(request.query).await?)
    }

    /// Run every statement of the batch, in order, as one unit
    pub async fn batch(&self, body: &[u8]) -> ProxyResult<Vec<StatementResult>> {
        let request: BatchRequest = parse_body(body)?;

        let statements = request
            .batch
            .into_iter()
            .map(|item| {
                let statement = Statement::prepare(item.query);
                match item.params {
                    Some(params) => statement.bind(params),
                    None => statement,
                }
            })
            .collect();

        Ok(self.database.batch(statements).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ProxyError;
    use crate::database::SqliteDatabase;
    use serde_json::json;

    fn handler() -> ApiHandler {
        ApiHandler::new(Arc::new(SqliteDatabase::in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_run_query_coerces_params() {
        let handler = handler();
        let result = handler
            .run_query(br#"{"query": "SELECT ? AS a, ? AS b, ? AS c, ? AS d", "params": [1, "x", true, {"k": 1}]}"#)
            .await
            .unwrap();
        assert_eq!(
            result.results,
            vec![json!({"a": 1, "b": "x", "c": 1, "d": "{\"k\":1}"})]
        );
    }

    #[tokio::test]
    async fn test_batch_binds_raw_params() {
        let handler = handler();
        let err = handler
            .batch(br#"{"batch": [{"query": "SELECT ?", "params": [{"k": 1}]}]}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Database(_)));
        assert!(err.to_string().starts_with("D1_TYPE_ERROR"));
    }

    #[tokio::test]
    async fn test_exec_runs_each_line() {
        let handler = handler();
        let result = handler
            .exec(br#"{"query": "CREATE TABLE t (v);\nINSERT INTO t VALUES (1);"}"#)
            .await
            .unwrap();
        assert_eq!(result.count, 2);
    }

    #[tokio::test]
    async fn test_missing_query_fails_as_execution_error() {
        let handler = handler();
        let err = handler.run_query(br#"{"params": [1]}"#).await.unwrap_err();
        assert!(err.envelope_message().starts_with("Failed to run query:"));
    }
}
