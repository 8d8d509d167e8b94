//! HTTP server initialization and runtime setup.
//!
//! Handles logging setup, store opening and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::RedbUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` directives are honored; `log_level` is used when it is unset.
/// `log_format` selects human-readable (`text`) or JSON lines (`json`) output.
pub fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Opens the store, serves until Ctrl-C or SIGTERM, then drains in-flight
/// requests. The store is closed once the server has stopped.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened (missing directory, or already opened by
///   another process such as a running `admin` command)
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = RedbUrlRepository::open(&config.db_path)
        .with_context(|| format!("Failed to open store at {}", config.db_path))?;
    tracing::info!(path = %config.db_path, "Store opened");

    let state = AppState::new(
        Arc::new(repository),
        &config.base_url,
        config.code_length,
        &config.api_key,
    );

    let app = app_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, store closed");

    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
