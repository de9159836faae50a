//! Schema migrations.

use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Applies pending migrations from `migrations/` at the crate root.
///
/// Already-applied versions are skipped, so this is run on every start of
/// both `import` and `serve`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = Migrator::new(dir.as_path()).await?;
    migrator.run(pool).await?;
    log::debug!(
        "Database schema up to date ({} migrations known)",
        migrator.iter().count()
    );
    Ok(())
}
