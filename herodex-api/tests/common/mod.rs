/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Router construction over an in-memory SQLite database
/// - An in-memory log sink for asserting on deferred writes
/// - Request building and JSON body helpers
///
/// No external services are required; everything runs in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use herodex_api::app::{build_router, AppState};
use herodex_api::config::{AdminConfig, ApiConfig, Config, DatabaseConfig, NotificationsConfig};
use herodex_shared::db::migrations::run_migrations;
use herodex_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use herodex_tasks::sink::MemorySink;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Token the test configuration expects on admin routes
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub sink: Arc<MemorySink>,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_sink(Arc::new(MemorySink::new())).await
    }

    /// Creates a test context whose log sink rejects every append
    pub async fn with_failing_sink() -> anyhow::Result<Self> {
        Self::with_sink(Arc::new(MemorySink::failing())).await
    }

    /// Creates a test context around the given sink
    ///
    /// The pool is capped at one connection so every query sees the same
    /// in-memory database.
    async fn with_sink(sink: Arc<MemorySink>) -> anyhow::Result<Self> {
        let db = create_pool(PoolConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        })
        .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            admin: AdminConfig {
                token: TEST_ADMIN_TOKEN.to_string(),
            },
            notifications: NotificationsConfig {
                log_path: "log.txt".to_string(),
            },
        };

        let state = AppState::new(db.clone(), config, sink.clone());
        let app = build_router(state);

        Ok(Self { db, sink, app })
    }

    /// Sends a request without a body
    pub async fn request(&self, method: &str, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Sends a request with a JSON body
    pub async fn request_json(&self, method: &str, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Sends a request with an x-token header
    pub async fn request_with_token(&self, method: &str, uri: &str, token: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-token", token)
            .body(Body::empty())
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Waits until the sink holds at least `count` lines, then returns them
    ///
    /// Deferred tasks drain on a spawned worker, so tests poll briefly
    /// instead of assuming the writes landed before the response did.
    pub async fn wait_for_lines(&self, count: usize) -> Vec<String> {
        for _ in 0..500 {
            if self.sink.len() >= count {
                return self.sink.lines();
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        panic!(
            "Timed out waiting for {} log lines, have {:?}",
            count,
            self.sink.lines()
        );
    }
}

/// Reads a response body as JSON
pub async fn response_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Asserts a status code and returns the parsed JSON body
pub async fn assert_status_json(response: Response, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8_lossy(&body);

    assert_eq!(status, expected, "unexpected status, body: {}", body_str);

    serde_json::from_slice(&body).unwrap()
}
