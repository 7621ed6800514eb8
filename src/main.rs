//! Stayhaven reservation engine entrypoint.
//!
//! Boot order matters: configuration, database pool, migrations (opt-in),
//! then the invariant guard. The process only reports ready once the
//! storage-level exclusion guarantee has been verified.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use stayhaven::adapters::postgres::PostgresSchemaGuard;
use stayhaven::config::AppConfig;
use stayhaven::startup::StartupGuard;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.service.log_level))
        .init();

    tracing::info!(environment = ?config.service.environment, "starting stayhaven reservation engine");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let guard = StartupGuard::new(Arc::new(PostgresSchemaGuard::new(pool.clone())));
    guard
        .validate_invariants_or_fail(&config.service.environment)
        .await?;

    tracing::info!("reservation engine ready");

    // The transport layer (owned by the platform gateway) mounts the
    // handlers from here; this binary just holds the process open.
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    Ok(())
}
