/// Embedded schema migrations
///
/// SQL files live in `taskboard-shared/migrations/` and are compiled into the
/// binary with `sqlx::migrate!`, so the server never needs the directory at
/// runtime.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Migrator for the workspace schema
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if any migration fails to apply
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Starting database migrations"
    );

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
