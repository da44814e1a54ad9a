//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlgate init --config <path>
//! - sqlgate serve --config <path> [overrides]
//! - sqlgate check --config <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sqlgate - bearer-token HTTP gateway for SQL statements
#[derive(Parser, Debug)]
#[command(name = "sqlgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a config file with a freshly generated API key
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./sqlgate.json")]
        config: PathBuf,
    },

    /// Start the gateway
    Serve(ServeArgs),

    /// Validate a config file and print the effective settings
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./sqlgate.json")]
        config: PathBuf,
    },
}

/// Arguments for `serve`; flags override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(long, default_value = "./sqlgate.json")]
    pub config: PathBuf,

    /// Shared secret for bearer auth
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// SQLite file path, or :memory:
    #[arg(long)]
    pub database: Option<String>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
