// NumNum HTTP server
// Serves the conversation session over a small JSON API

mod api_types;
mod handlers;

pub use api_types::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse};
pub use handlers::{
    create_router, handle_analyze, health_check, home, ApiError, WELCOME_MESSAGE,
};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::session::ConversationSession;

/// Request bodies are short natural-language questions.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: crate::config::constants::DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

impl From<&Config> for ServerConfig {
    fn from(config: &Config) -> Self {
        Self {
            bind_address: config.bind_address.clone(),
        }
    }
}

/// HTTP front end for one shared conversation session
pub struct RelayServer {
    session: Arc<ConversationSession>,
    config: ServerConfig,
}

impl RelayServer {
    pub fn new(session: Arc<ConversationSession>, config: ServerConfig) -> Self {
        Self { session, config }
    }

    /// Full application router with CORS, tracing, and body limits applied
    pub fn router(&self) -> axum::Router {
        create_router(Arc::clone(&self.session))
            .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server; returns after Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.bind_address))?;

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!("NumNum API listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
