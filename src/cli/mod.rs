//! CLI module for sqlgate
//!
//! Provides command-line interface for:
//! - init: write a config file with a new API key
//! - serve: run the gateway
//! - check: validate a config file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check, init, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
