//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool, never a connection per request
//! - Listing uses JOINs - no N+1 queries
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations; dropping one uncommitted rolls it back

pub mod pool;
pub mod repos;

pub use pool::{create_pool, ping, DatabaseConfig};
pub use repos::*;
pub use sqlx::PgPool;

/// Embedded schema and reference-data migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply pending migrations.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running phrasebook migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
