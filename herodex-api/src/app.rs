/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use herodex_api::{app::AppState, config::Config};
/// use herodex_shared::db::pool::{create_pool, DatabaseConfig};
/// use herodex_tasks::sink::FileSink;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let sink = Arc::new(FileSink::open(&config.notifications.log_path).await?);
/// let state = AppState::new(pool, config, sink);
/// let app = herodex_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use herodex_tasks::sink::LogSink;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Append-only notification log, shared by all deferred tasks
    pub log_sink: Arc<dyn LogSink>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config, log_sink: Arc<dyn LogSink>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            log_sink,
        }
    }

    /// Gets the admin token protected routes are checked against
    pub fn admin_token(&self) -> &str {
        &self.config.admin.token
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// ├── /heroes/                       # Hero resource
/// │   ├── POST   /                   # Create hero
/// │   ├── GET    /                   # List heroes (offset/limit)
/// │   ├── GET    /:id                # Read one hero
/// │   ├── PATCH  /:id                # Partial update
/// │   └── DELETE /:id                # Delete hero
/// ├── /notifications/
/// │   └── POST /send/:email          # Schedule deferred log writes
/// └── /admin/                        # Requires x-token header
///     └── POST /
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Deferred-task drain (innermost, wraps every handler)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Admin token gate (per-route-group basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Hero resource routes
    let hero_routes = Router::new()
        .route(
            "/",
            post(routes::heroes::create_hero).get(routes::heroes::read_heroes),
        )
        .route(
            "/:id",
            get(routes::heroes::read_hero)
                .patch(routes::heroes::update_hero)
                .delete(routes::heroes::delete_hero),
        );

    // Notification routes (respond immediately, work happens deferred)
    let notification_routes =
        Router::new().route("/send/:email", post(routes::notifications::send_notification));

    // Admin routes (require the x-token header)
    let admin_routes = Router::new()
        .route("/", post(routes::admin::update_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_admin_token,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/heroes", hero_routes)
        .nest("/notifications", notification_routes)
        .nest("/admin", admin_routes)
        .layer(axum::middleware::from_fn(
            crate::middleware::deferred::deferred_tasks_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
