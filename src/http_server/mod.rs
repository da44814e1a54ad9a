//! # sqlgate HTTP Server Module
//!
//! Axum server exposing the SQL gateway.
//!
//! # Endpoints
//!
//! - `POST /api/all` - one statement, coerced params
//! - `POST /api/exec` - raw SQL
//! - `POST /api/batch` - atomic statement batch
//!
//! Every path, unknown ones included, sits behind the bearer gate.

pub mod config;
pub mod middleware;
pub mod routes;
pub mod server;

pub use config::{ConfigError, ConfigResult, GatewayConfig};
pub use routes::GatewayState;
pub use server::GatewayServer;
