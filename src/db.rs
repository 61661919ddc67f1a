//! Schema management for the catalog database.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::DbPool;

use crate::errors::{CatalogError, CatalogResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply every pending migration and return how many were run.
pub fn run_migrations(pool: &DbPool) -> CatalogResult<usize> {
    let mut conn = pool.get()?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| CatalogError::StorageFailure(err.to_string()))?;

    Ok(applied.len())
}
