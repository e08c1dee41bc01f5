//! # Stockroom API Server
//!
//! Serves the inventory GraphQL API over HTTP.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  env ──► ApiConfig ──► Database (migrations) ──► Router ──► listen     │
//! │                                                                         │
//! │  Ctrl+C / SIGTERM ──► drain requests ──► close pool ──► exit           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use stockroom_api::{build_router, telemetry, ApiConfig, AppState, RouterOptions};
use stockroom_db::Database;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    info!("Starting Stockroom API server...");

    // Load configuration
    let config = ApiConfig::load().context("Failed to load configuration")?;
    info!(
        addr = %config.bind_addr(),
        database = %config.database_path.display(),
        playground = config.graphql_playground,
        "Configuration loaded"
    );

    // Open database (runs migrations)
    let db = Database::new(config.db_config())
        .await
        .context("Failed to open database")?;
    info!("Database ready");

    // Create shared state
    let state = Arc::new(AppState::new(db.clone()));

    let router = build_router(
        state,
        &RouterOptions {
            cors_allowed_origin: config.cors_allowed_origin.clone(),
            graphql_playground: config.graphql_playground,
        },
    );

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening for GraphQL requests on /graphql");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
