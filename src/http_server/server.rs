//! # HTTP Server
//!
//! Builds the gateway router and serves it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::database::Database;
use crate::observability::{log_event, Event};

use super::config::GatewayConfig;
use super::middleware::{log_requests, pretty_json, require_bearer};
use super::routes::{gateway_routes, not_found_handler, GatewayState};

/// HTTP server for the SQL gateway
pub struct GatewayServer {
    config: GatewayConfig,
    router: Router,
}

impl GatewayServer {
    /// Create a server forwarding to `database`
    pub fn new(config: GatewayConfig, database: Arc<dyn Database>) -> Self {
        let router = Self::build_router(&config, database);
        Self { config, router }
    }

    /// Build the router with every layer applied
    fn build_router(config: &GatewayConfig, database: Arc<dyn Database>) -> Router {
        let state = Arc::new(GatewayState::new(
            database,
            config.api_key.clone(),
            config.max_body_bytes,
        ));

        let router = Router::new()
            .merge(gateway_routes(state.clone()))
            .fallback(not_found_handler)
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(log_requests))
                    .layer(middleware::from_fn(pretty_json))
                    .layer(middleware::from_fn_with_state(state, require_bearer)),
            );

        match Self::cors_layer(&config.cors_origins) {
            Some(cors) => router.layer(cors),
            None => router,
        }
    }

    /// CORS is only enabled when origins are configured
    fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
        if origins.is_empty() {
            return None;
        }
        let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        Some(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        log_event(
            Event::ServerStarted,
            &[("addr", local.as_str()), ("database", self.config.database.as_str())],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ServerStopped, &[("addr", local.as_str())]);
        Ok(())
    }
}

async fn shutdown_signal() {
    // An error here means no signal handler; just serve forever.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
