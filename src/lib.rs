//! sqlgate - bearer-token HTTP gateway for SQL statements
//!
//! Three JSON endpoints forward single statements, raw SQL and atomic
//! batches to a [`database::Database`] and return its results verbatim.

pub mod api;
pub mod auth;
pub mod cli;
pub mod database;
pub mod http_server;
pub mod observability;
