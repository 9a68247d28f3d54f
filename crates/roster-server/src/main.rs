//! Student roster server binary.
//!
//! Wires the JSON-file backend to the HTTP API and serves it until
//! `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `roster-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Create the roster file if it does not exist
//! 4. Load the roster once so a corrupt file stops startup
//! 5. Serve the HTTP API

mod config;
mod error;

use std::sync::Arc;

use roster_api::{AppState, ServerConfig};
use roster_db::{JsonFileBackend, StudentStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, RosterConfig};
use crate::error::ServerError;

/// Application entry point for the roster server.
///
/// # Errors
///
/// Returns an error if configuration, the roster file, or the HTTP
/// listener cannot be set up, or if serving fails.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration. Logging is not up yet; anything the config
    //    layer logs here is dropped.
    let config = RosterConfig::load()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("roster-server starting");
    info!(
        school = %config.school.name,
        host = %config.server.host,
        port = config.server.port,
        data_file = %config.storage.data_file,
        "Configuration loaded"
    );

    // 3. Make sure the roster file exists.
    let backend = JsonFileBackend::new(&config.storage.data_file);
    if backend.ensure_initialized()? {
        info!(path = %backend.path().display(), "Initialized empty roster");
    }

    // 4. Validate the stored roster up front.
    let store = StudentStore::load(&backend)?;
    info!(students = store.len(), "Roster loaded");

    // 5. Serve the API.
    let state = Arc::new(AppState::new(Arc::new(backend), config.school.name));
    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    roster_api::start_server(&server_config, state).await?;

    info!("roster-server exiting");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), ServerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| ServerError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
