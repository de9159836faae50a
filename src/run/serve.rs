//! Lookup server wiring.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::config::ServeConfig;
use crate::lookup::LookupService;
use crate::server::start_lookup_server;
use crate::storage::{init_db_pool_with_path, run_migrations};

/// Serves lookups from `config.db_path` until `shutdown` is cancelled.
pub async fn run_server(config: ServeConfig, shutdown: CancellationToken) -> Result<()> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let service = LookupService::new(pool.as_ref().clone());
    let served = start_lookup_server(&config.http_addr, service, shutdown).await;

    pool.close().await;
    served
}
