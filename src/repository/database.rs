//! SQLite connection pool setup and schema migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

use crate::error::{RegistryError, Result};

/// Opens a pool for `database_url` and applies pending migrations.
///
/// # Configuration
/// - Journal mode: WAL
/// - Synchronous: NORMAL
/// - Busy timeout: 5 seconds
/// - Acquire timeout: 10 seconds
///
/// In-memory URLs get exactly one connection that is never recycled, since
/// every SQLite connection to `:memory:` would otherwise see its own database.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let in_memory = is_in_memory(database_url);

    let mut options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RegistryError::Internal(format!("invalid database URL: {}", e)))?
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .idle_timeout(Duration::from_secs(300))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .map_err(|e| RegistryError::Internal(format!("failed to create connection pool: {}", e)))?;

    migrate(&pool).await?;
    info!("Database ready at {}", database_url);

    Ok(pool)
}

/// Matches both `sqlite::memory:` and URI-style `?mode=memory` URLs.
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Applies the embedded migrations under `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RegistryError::Internal(format!("failed to run migrations: {}", e)))
}
