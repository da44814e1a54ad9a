//! HTTP middleware
//!
//! Applied outermost first: request logging, pretty JSON, bearer auth.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use uuid::Uuid;

use crate::observability::{log_event, Event};

use super::routes::GatewayState;

/// Reject requests without the configured bearer token
pub async fn require_bearer(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    match state.gate.verify(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            log_event(
                Event::AuthRejected,
                &[
                    ("path", request.uri().path()),
                    ("reason", rejection.reason()),
                ],
            );
            rejection.into_response()
        }
    }
}

/// Log each request on arrival and on completion
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    log_event(
        Event::RequestReceived,
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis().to_string();

    log_event(
        Event::RequestCompleted,
        &[
            ("elapsed_ms", elapsed_ms.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
            ("status", response.status().as_str()),
        ],
    );

    response
}

/// Indent JSON responses when the URL carries a `pretty` query parameter
pub async fn pretty_json(request: Request, next: Next) -> Response {
    let pretty = wants_pretty(request.uri().query());
    let response = next.run(request).await;

    if !pretty || !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    let rendered = serde_json::from_slice::<Value>(&bytes).and_then(|v| serde_json::to_vec_pretty(&v));
    match rendered {
        Ok(indented) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(indented))
        }
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}

fn wants_pretty(query: Option<&str>) -> bool {
    query
        .map(|q| {
            q.split('&')
                .any(|pair| pair.split('=').next() == Some("pretty"))
        })
        .unwrap_or(false)
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}
