//! Observability for sqlgate
//!
//! Structured JSON logging of lifecycle and request events.
//!
//! # Usage
//!
//! ```ignore
//! use sqlgate::observability::{log_event, Event};
//!
//! log_event(Event::RequestCompleted, &[("status", "200")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
