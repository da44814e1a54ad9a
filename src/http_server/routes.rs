//! Gateway HTTP Routes
//!
//! `POST /api/all`, `POST /api/exec` and `POST /api/batch`.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::api::{ApiHandler, ErrorResponse, ProxyError, ProxyResult};
use crate::auth::BearerGate;
use crate::database::{Database, ExecResult, StatementResult};

// ==================
// Shared State
// ==================

/// State shared by the gateway handlers and the auth gate
pub struct GatewayState {
    pub handler: ApiHandler,
    pub gate: BearerGate,
    pub max_body_bytes: usize,
}

impl GatewayState {
    pub fn new(database: Arc<dyn Database>, api_key: impl Into<String>, max_body_bytes: usize) -> Self {
        Self {
            handler: ApiHandler::new(database),
            gate: BearerGate::new(api_key),
            max_body_bytes,
        }
    }
}

// ==================
// Gateway Routes
// ==================

/// Create gateway routes
pub fn gateway_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/api/all", post(query_handler))
        .route("/api/exec", post(exec_handler))
        .route("/api/batch", post(batch_handler))
        .with_state(state)
}

async fn read_body(body: Body, limit: usize) -> ProxyResult<Bytes> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))
}

// ==================
// Handlers
// ==================

async fn query_handler(
    State(state): State<Arc<GatewayState>>,
    body: Body,
) -> Result<Json<StatementResult>, ProxyError> {
    let body = read_body(body, state.max_body_bytes).await?;
    Ok(Json(state.handler.run_query(&body).await?))
}

async fn exec_handler(
    State(state): State<Arc<GatewayState>>,
    body: Body,
) -> Result<Json<ExecResult>, ProxyError> {
    let body = read_body(body, state.max_body_bytes).await?;
    Ok(Json(state.handler.exec(&body).await?))
}

async fn batch_handler(
    State(state): State<Arc<GatewayState>>,
    body: Body,
) -> Result<Json<Vec<StatementResult>>, ProxyError> {
    let body = read_body(body, state.max_body_bytes).await?;
    Ok(Json(state.handler.batch(&body).await?))
}

/// Fallback for unknown paths (still behind the auth gate)
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}
