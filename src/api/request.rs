//! API request types
//!
//! JSON request bodies for the three gateway operations. Bodies are parsed
//! inside the handlers so a malformed body is reported the same way as a
//! failing query.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ProxyError, ProxyResult};

/// One parameterized statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

/// An ordered list of statements run atomically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub batch: Vec<QueryRequest>,
}

/// Raw SQL for exec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecRequest {
    pub query: String,
}

/// Parse a request body
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ProxyResult<T> {
    serde_json::from_slice(body).map_err(ProxyError::InvalidBody)
}
