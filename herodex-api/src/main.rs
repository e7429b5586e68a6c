//! # Herodex API Server
//!
//! This is the main API server for Herodex, providing CRUD endpoints over
//! the hero store plus a notification endpoint that schedules deferred,
//! non-blocking log writes.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Hero CRUD endpoints backed by SQLite
//! - A notification endpoint whose log writes run after the response
//! - An admin namespace behind a token gate
//!
//! ## Usage
//!
//! ```bash
//! ADMIN_TOKEN=change-me cargo run -p herodex-api
//! ```

use std::sync::Arc;

use herodex_api::app::{build_router, AppState};
use herodex_api::config::Config;
use herodex_shared::db::migrations::{ensure_database_exists, run_migrations};
use herodex_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use herodex_tasks::sink::FileSink;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herodex_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Herodex API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Bootstrap the database and run migrations
    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    // Open the shared notification log sink
    let sink = Arc::new(FileSink::open(&config.notifications.log_path).await?);

    // Build the application
    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config, sink.clone());
    let app = build_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Ordered teardown: no more requests are in flight at this point
    tracing::info!("Shutdown signal received, closing resources...");
    close_pool(pool).await;
    sink.close().await;

    Ok(())
}

/// Resolves when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
