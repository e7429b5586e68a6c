/// Database bootstrap and schema migrations
///
/// This module creates the SQLite database when it does not exist yet and
/// applies the embedded schema. The schema is a single table, so it ships
/// inline and every statement is idempotent (`IF NOT EXISTS`) rather than
/// going through versioned migration files.
///
/// # Example
///
/// ```no_run
/// use herodex_shared::db::pool::{create_pool, DatabaseConfig};
/// use herodex_shared::db::migrations::{ensure_database_exists, run_migrations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let url = std::env::var("DATABASE_URL")?;
///     ensure_database_exists(&url).await?;
///
///     let pool = create_pool(DatabaseConfig {
///         url,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

/// Embedded schema statements, applied in order
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS heroes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER,
        secret_name TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_heroes_name ON heroes (name)",
    "CREATE INDEX IF NOT EXISTS idx_heroes_age ON heroes (age)",
];

/// Applies the embedded schema to the database
///
/// Safe to call on every startup: all statements are idempotent.
///
/// # Errors
///
/// Returns an error if any schema statement fails to execute or the
/// database connection is lost mid-way.
///
/// # Example
///
/// ```no_run
/// use herodex_shared::db::pool::{create_pool, DatabaseConfig};
/// use herodex_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Starting database migrations");

    for statement in SCHEMA {
        if let Err(e) = sqlx::query(statement).execute(pool).await {
            warn!("Migration statement failed: {}", e);
            return Err(e);
        }
    }

    info!("All database migrations completed successfully");
    Ok(())
}

/// Creates the database if it doesn't exist
///
/// For SQLite this creates the database file. Useful for development and
/// testing; in production the file usually already exists.
///
/// # Errors
///
/// Returns an error if:
/// - The database URL is invalid
/// - The database file cannot be created
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    info!("Checking if database exists");

    if !Sqlite::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Sqlite::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}
