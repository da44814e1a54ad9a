//! API Layer for sqlgate
//!
//! Translates JSON request bodies into [`crate::database::Database`] calls.
//!
//! # Supported Operations
//!
//! - query: one statement, parameters coerced before binding
//! - exec: raw SQL, no binding
//! - batch: ordered statements, parameters bound raw, applied atomically

mod coerce;
mod errors;
mod handler;
mod request;
mod response;

pub use coerce::{coerce, coerce_all, CoercedParam};
pub use errors::{ProxyError, ProxyResult, FAILURE_CONTEXT};
pub use handler::ApiHandler;
pub use request::{parse_body, BatchRequest, ExecRequest, QueryRequest};
pub use response::ErrorResponse;
