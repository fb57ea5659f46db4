use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Type alias for the PostgreSQL connection pool
pub type DbPool = PgPool;

/// Opens the connection pool the rank tracker runs on
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    log::info!("Connecting to the serptrack database...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Some(config.idle_timeout))
        .max_lifetime(Some(config.max_lifetime))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Freshness stamps and check dates are compared in UTC;
                // force every session to match.
                sqlx::query("SET timezone = 'UTC'").execute(conn).await?;
                Ok(())
            })
        })
        .connect(&config.url)
        .await?;

    log::info!(
        "Database pool ready for rank checks ({}-{} connections)",
        config.min_connections,
        config.max_connections
    );

    Ok(pool)
}

/// Applies pending schema migrations (websites, keywords, the credential
/// pool and the rank history log)
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("Applying schema migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    log::info!("Schema is up to date");
    Ok(())
}

/// Cheap connectivity probe backing the readiness endpoint
pub async fn ping(pool: &DbPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
