//! Database bootstrap: connect with bounded timeouts, then migrate.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to PostgreSQL. Connect and acquire are bounded so a dead
/// database surfaces as a storage failure instead of a hang.
pub async fn connect_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    Database::connect(opts)
        .await
        .map_err(|e| AppError::storage(format!("Failed to connect to database: {e}")))
}

/// Single entrypoint used by the state builder: connect + run migrations.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile, owner).await?;

    Migrator::up(&conn, None)
        .await
        .map_err(|e| AppError::storage(format!("Failed to run migrations: {e}")))?;

    let applied = migration::count_applied_migrations(&conn)
        .await
        .unwrap_or(0);
    info!(applied_migrations = applied, "database connected and migrated");
    Ok(conn)
}
