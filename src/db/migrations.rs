use sqlx::{Pool, Postgres};
use tracing::info;

/// Run all pending database migrations
///
/// Creates the `jobs` and `job_applications` document tables. Safe to run
/// multiple times as sqlx tracks which migrations have already been applied.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
