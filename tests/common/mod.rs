//! Shared test utilities for gateway integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use sqlgate::database::{
    Database, DbError, DbResult, ExecResult, Statement, StatementMeta, StatementResult,
};
use sqlgate::http_server::{GatewayConfig, GatewayServer};

pub const API_KEY: &str = "test-secret";

/// One call observed by [`RecordingDatabase`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Run(Statement),
    Exec(String),
    Batch(Vec<Statement>),
}

/// Database double that records every call and optionally fails
#[derive(Default)]
pub struct RecordingDatabase {
    calls: Mutex<Vec<Call>>,
    fail_with: Option<String>,
}

impl RecordingDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a worker error carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> DbResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(DbError::Worker(message.clone())),
            None => Ok(()),
        }
    }
}

fn empty_result() -> StatementResult {
    StatementResult::new(StatementMeta::default(), Vec::new())
}

#[async_trait]
impl Database for RecordingDatabase {
    async fn run(&self, statement: Statement) -> DbResult<StatementResult> {
        self.record(Call::Run(statement))?;
        Ok(empty_result())
    }

    async fn exec(&self, sql: String) -> DbResult<ExecResult> {
        self.record(Call::Exec(sql))?;
        Ok(ExecResult {
            count: 1,
            duration: 0.0,
        })
    }

    async fn batch(&self, statements: Vec<Statement>) -> DbResult<Vec<StatementResult>> {
        let count = statements.len();
        self.record(Call::Batch(statements))?;
        Ok((0..count).map(|_| empty_result()).collect())
    }
}

/// Build the full gateway router over `database`
pub fn router(database: Arc<dyn Database>) -> Router {
    router_with_config(GatewayConfig::new(API_KEY), database)
}

/// Build the gateway router from an explicit config
pub fn router_with_config(config: GatewayConfig, database: Arc<dyn Database>) -> Router {
    GatewayServer::new(config, database).router()
}

/// Authorized JSON POST
pub fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", API_KEY))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request through the router
pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
