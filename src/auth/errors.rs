//! # Auth Errors
//!
//! Outcomes of the bearer gate that stop a request.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::ErrorResponse;

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    /// No Authorization header
    #[error("Unauthorized")]
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    #[error("Bad Request")]
    MalformedHeader,

    /// Well-formed token that does not match the secret
    #[error("Unauthorized")]
    InvalidToken,
}

impl AuthRejection {
    /// Returns the HTTP status code for this rejection
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthRejection::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthRejection::MalformedHeader => StatusCode::BAD_REQUEST,
            AuthRejection::InvalidToken => StatusCode::UNAUTHORIZED,
        }
    }

    /// Value of the `WWW-Authenticate` challenge
    pub fn challenge(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredentials => "Bearer realm=\"\"",
            AuthRejection::MalformedHeader => "Bearer error=\"invalid_request\"",
            AuthRejection::InvalidToken => "Bearer error=\"invalid_token\"",
        }
    }

    /// Short machine-readable reason, used in logs
    pub fn reason(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredentials => "missing_credentials",
            AuthRejection::MalformedHeader => "invalid_request",
            AuthRejection::InvalidToken => "invalid_token",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let mut response = (
            self.status_code(),
            Json(ErrorResponse::new(self.to_string())),
        )
            .into_response();
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(self.challenge()),
        );
        response
    }
}
