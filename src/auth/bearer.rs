//! Bearer token gate
//!
//! Admits a request only when its `Authorization` header is
//! `Bearer <token>` and the token equals the configured secret.

use std::sync::OnceLock;

use axum::http::{header, HeaderMap};
use regex::Regex;

use super::crypto::constant_time_str_eq;
use super::errors::AuthRejection;

/// `Bearer` (any case) followed by an RFC 6750 token68
fn bearer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i:bearer) +([A-Za-z0-9._~+/-]+=*) *$").expect("bearer pattern is valid")
    })
}

/// Whether `s` can appear as a bearer token
pub fn is_token68(s: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._~+/-]+=*$").expect("token68 pattern is valid"))
        .is_match(s)
}

/// Shared-secret bearer authentication
#[derive(Clone)]
pub struct BearerGate {
    secret: String,
}

impl BearerGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check the request headers against the secret
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), AuthRejection> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthRejection::MissingCredentials)?;
        let value = value.to_str().map_err(|_| AuthRejection::MalformedHeader)?;
        self.verify_header(value)
    }

    /// Check a raw `Authorization` header value
    pub fn verify_header(&self, value: &str) -> Result<(), AuthRejection> {
        let token = bearer_pattern()
            .captures(value)
            .and_then(|caps| caps.get(1))
            .ok_or(AuthRejection::MalformedHeader)?;

        if constant_time_str_eq(token.as_str(), &self.secret) {
            Ok(())
        } else {
            Err(AuthRejection::InvalidToken)
        }
    }
}

impl std::fmt::Debug for BearerGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerGate").finish_non_exhaustive()
    }
}
