//! # API Errors
//!
//! Every failure inside a gateway handler, from reading the body to the
//! database call, collapses into one envelope: HTTP 500 with
//! `{"error": "Failed to run query: <detail>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::database::DbError;
use crate::observability::{log_event, Event};

use super::response::ErrorResponse;

/// Prefix of every execution error message
pub const FAILURE_CONTEXT: &str = "Failed to run query:";

/// Result type for handler execution
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Handler execution errors
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The body could not be read
    #[error("failed to read request body: {0}")]
    Body(String),

    /// The body was not the expected JSON shape
    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The database refused or failed the operation
    #[error("{0}")]
    Database(#[from] DbError),
}

impl ProxyError {
    /// Message placed in the error envelope
    pub fn envelope_message(&self) -> String {
        format!("{} {}", FAILURE_CONTEXT, self)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = self.envelope_message();
        log_event(Event::QueryFailed, &[("error", message.as_str())]);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(message)),
        )
            .into_response()
    }
}
