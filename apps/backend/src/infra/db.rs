use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Open a connection pool for `database_url`. Does not run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every pooled connection to `sqlite::memory:` is a separate database.
    if is_in_memory_sqlite(database_url) {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect to database: {e}")))
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("failed to apply migrations: {e}")))?;

    info!(backend = ?conn.get_database_backend(), "Database ready");
    Ok(conn)
}

fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite:") && database_url.contains(":memory:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_sqlite_urls() {
        assert!(is_in_memory_sqlite("sqlite::memory:"));
        assert!(is_in_memory_sqlite("sqlite://:memory:?cache=shared"));
        assert!(!is_in_memory_sqlite("sqlite://./todo.db?mode=rwc"));
        assert!(!is_in_memory_sqlite("postgresql://u:p@localhost:5432/todo"));
    }

    #[tokio::test]
    async fn bootstrap_applies_migrations_to_fresh_sqlite() {
        let conn = bootstrap_db("sqlite::memory:").await.unwrap();
        let version = migration::get_latest_migration_version(&conn)
            .await
            .unwrap();
        assert!(version.is_some());
    }
}
