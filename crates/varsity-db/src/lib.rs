//! # Varsity DB
//!
//! PostgreSQL pool initialisation and embedded migrations for the Varsity API.
//!
//! # Example
//!
//! ```ignore
//! use varsity_config::DatabaseConfig;
//! use varsity_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! ```

use anyhow::{Context, bail};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use varsity_config::DatabaseConfig;

/// Migrations under the workspace `migrations/` directory, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Creates the connection pool described by `config`.
///
/// The returned pool is cheaply cloneable and is shared through application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    if !config.is_configured() {
        bail!("DATABASE_URL must be set when using the postgres storage backend");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialised"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");
    Ok(())
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
