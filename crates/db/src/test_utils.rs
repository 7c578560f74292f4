//! Test utilities for database operations.
//!
//! Integration tests run against an in-memory SQLite database with the real
//! migrations applied, so reconciliation and scope behavior is exercised
//! against actual SQL. Requires the `sqlx-sqlite` feature of sea-orm, which
//! the workspace enables for test builds.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::migrations::Migrator;

/// Connect to a fresh in-memory SQLite database and apply all migrations.
///
/// The pool is capped at a single connection: every pooled connection to
/// `:memory:` would otherwise open its own empty database.
pub async fn memory_db() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let conn = Database::connect(opt).await?;
    Migrator::up(&conn, None).await?;
    Ok(conn)
}

/// Like [`memory_db`], wrapped in the [`std::sync::Arc`] the repositories
/// expect.
pub async fn memory_db_arc() -> Result<std::sync::Arc<DatabaseConnection>, DbErr> {
    Ok(std::sync::Arc::new(memory_db().await?))
}
