/// Database layer for Herodex
///
/// This module provides database connection pooling and schema migrations.
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: Database bootstrap and embedded schema migrations
///
/// # Example
///
/// ```no_run
/// use herodex_shared::db::pool::{create_pool, DatabaseConfig};
/// use herodex_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
