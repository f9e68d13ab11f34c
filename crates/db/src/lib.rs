//! Persistence layer for newsdesk: models, repositories, and the
//! [`gateway::NewsGateway`] seam used by the update operation.

pub mod gateway;
pub mod models;
pub mod repositories;

use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

/// Migrations embedded from `crates/db/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Applied versus embedded migration version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaStatus {
    /// Highest successfully applied version, `None` on an unmigrated database.
    pub applied_version: Option<i64>,
    /// Highest version this build ships with.
    pub expected_version: Option<i64>,
}

impl SchemaStatus {
    /// True when the database has every migration this build knows about.
    pub fn is_current(&self) -> bool {
        match (self.applied_version, self.expected_version) {
            (Some(applied), Some(expected)) => applied >= expected,
            (_, None) => true,
            (None, Some(_)) => false,
        }
    }
}

/// Compare the `_sqlx_migrations` ledger with [`MIGRATOR`].
///
/// A database that was never migrated has no ledger table and reports
/// `applied_version: None`.
pub async fn schema_status(pool: &DbPool) -> Result<SchemaStatus, sqlx::Error> {
    let ledger_exists: bool =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let applied_version = if ledger_exists {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
        )
        .fetch_one(pool)
        .await?
    } else {
        None
    };

    let expected_version = MIGRATOR.iter().map(|m| m.version).max();

    Ok(SchemaStatus {
        applied_version,
        expected_version,
    })
}
