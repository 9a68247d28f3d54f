//! Listener setup and shutdown for the roster API.
//!
//! [`start_server`] is the only async entry point the binary needs: it owns
//! the listener for the lifetime of the process and returns once `Ctrl-C`
//! has been handled and every in-flight mutation has saved.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::router::build_router;
use crate::state::AppState;

/// Where the roster API listens. Defaults to every interface on port 5000.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface address, as an IP literal.
    pub host: String,
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
        }
    }
}

/// Serve the roster routes over `state` until `Ctrl-C`.
///
/// Shutdown is graceful: a request that already holds the write lock
/// finishes its save before this returns, so the roster file is never
/// left half-updated by a stop.
///
/// # Errors
///
/// [`ServerError::Bind`] when `host` is not an IP literal or the port is
/// taken; [`ServerError::Serve`] if accepting connections fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Roster server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Roster server stopped");
    Ok(())
}

/// Resolve once `Ctrl-C` is received.
///
/// If the signal handler cannot be installed the server keeps running
/// until the process is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Why the roster API stopped before a shutdown signal.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The address could not be parsed or bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// Accepting or serving connections failed.
    #[error("serve error: {0}")]
    Serve(String),
}
