//! # Authentication
//!
//! Single shared-secret bearer authentication for every gateway route.
//!
//! ## Invariants
//! - No handler runs for a request that failed the gate
//! - Secrets are compared in constant time

mod bearer;
mod crypto;
mod errors;

pub use bearer::{is_token68, BearerGate};
pub use crypto::{constant_time_eq, constant_time_str_eq, generate_api_key};
pub use errors::AuthRejection;
