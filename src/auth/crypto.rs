//! # Secret Handling
//!
//! API key generation and comparison.
//!
//! ## Invariants
//! - Secrets are always compared in constant time

use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Generate a fresh API key (32 lowercase hex characters)
pub fn generate_api_key() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Constant-time comparison of two byte slices
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
