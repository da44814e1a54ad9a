//! Observable gateway events
//!
//! Every log line the gateway emits names one of these events.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    DatabaseOpened,
    ServerStarted,
    ServerStopped,

    // Requests
    RequestReceived,
    RequestCompleted,
    AuthRejected,
    QueryFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "config_loaded",
            Event::DatabaseOpened => "database_opened",
            Event::ServerStarted => "server_started",
            Event::ServerStopped => "server_stopped",
            Event::RequestReceived => "request_received",
            Event::RequestCompleted => "request_completed",
            Event::AuthRejected => "auth_rejected",
            Event::QueryFailed => "query_failed",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::AuthRejected => Severity::Warn,
            Event::QueryFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
