//! guestbook-server entry point.
//!
//! Initializes the schema, then serves the guestbook until SIGINT or
//! SIGTERM.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use guestbook_server::api;
use guestbook_server::app_state::AppState;
use guestbook_server::config::{GuestbookConfig, LogFormat, StorageBackend};
use guestbook_server::persistence::{GuestbookStore, MemoryStore, PostgresStore};
use guestbook_server::service::GuestbookService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started_at = Instant::now();

    // Load configuration
    let config = GuestbookConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(addr = %config.listen_addr, backend = ?config.storage_backend, "starting guestbook-server");

    // Build storage layer
    let store: Arc<dyn GuestbookStore> = match config.storage_backend {
        StorageBackend::Postgres => Arc::new(
            PostgresStore::connect(&config)
                .await
                .context("failed to connect to the database")?,
        ),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    // Build service layer; no traffic is served without a schema
    let guestbook = Arc::new(GuestbookService::new(store));
    guestbook
        .initialize()
        .await
        .context("failed to initialize the guestbook schema")?;

    let app = api::build_app(AppState::new(Arc::clone(&guestbook), started_at));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    guestbook.shutdown().await;
    tracing::info!("server stopped");

    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
