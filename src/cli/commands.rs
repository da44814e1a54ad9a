//! CLI command implementations
//!
//! `serve` is the only command that starts a runtime; `init` and `check`
//! touch nothing but the config file.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::auth::generate_api_key;
use crate::database::{Database, SqliteDatabase};
use crate::http_server::{GatewayConfig, GatewayServer};
use crate::observability::{log_event, Event, Logger};

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve(args) => serve(args),
        Command::Check { config } => check(&config),
    }
}

/// Write a template config with a generated API key
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(
            &config_path.display().to_string(),
        ));
    }

    let config = GatewayConfig::new(generate_api_key());
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, json + "\n")?;

    println!("Wrote {}", config_path.display());
    println!("API key: {}", config.api_key);
    Ok(())
}

/// Validate a config file and print the effective settings
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = GatewayConfig::load(config_path)?;
    println!("Config OK: {}", config_path.display());
    println!("  listen:   {}", config.socket_addr());
    println!("  database: {}", config.database);
    println!("  log_level: {}", config.log_level);
    Ok(())
}

/// Start the gateway and block until shutdown
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let config = resolve_config(&args)?;
    Logger::set_min_severity(config.severity()?);
    log_event(
        Event::ConfigLoaded,
        &[("config", args.config.display().to_string().as_str())],
    );

    let database: Arc<dyn Database> = Arc::new(SqliteDatabase::open(&config.database)?);
    log_event(Event::DatabaseOpened, &[("database", config.database.as_str())]);

    let server = GatewayServer::new(config, database);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Merge the config file with command-line and environment overrides
///
/// A missing config file is fine as long as an API key was supplied.
pub fn resolve_config(args: &ServeArgs) -> CliResult<GatewayConfig> {
    let mut config = if args.config.exists() {
        GatewayConfig::read(&args.config)?
    } else {
        match &args.api_key {
            Some(key) => GatewayConfig::new(key.clone()),
            None => {
                return Err(CliError::config_error(format!(
                    "Config file {} not found and no API key given (use --api-key or API_KEY)",
                    args.config.display()
                )))
            }
        }
    };

    if let Some(key) = &args.api_key {
        config.api_key = key.clone();
    }
    if let Some(database) = &args.database {
        config.database = database.clone();
    }
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    config.validate()?;
    Ok(config)
}
