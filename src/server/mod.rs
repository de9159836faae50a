//! HTTP lookup server.
//!
//! Serves `GET /v1/lookup?ip=<address>` from a [`LookupService`]. The server
//! stops accepting connections once the shutdown token is cancelled and
//! gives in-flight requests [`SHUTDOWN_GRACE_PERIOD`] to finish.

mod handlers;
mod types;

use std::future::IntoFuture;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::config::{LOOKUP_ROUTE, SHUTDOWN_GRACE_PERIOD};
use crate::lookup::{LocationStore, LookupService};

pub use handlers::lookup_handler;
pub use types::{ApiError, LocationResponse, LookupParams};

/// Builds the lookup router.
pub fn lookup_router<S>(service: LookupService<S>) -> Router
where
    S: LocationStore + Send + Sync + 'static,
{
    Router::new()
        .route(LOOKUP_ROUTE, get(lookup_handler::<S>))
        .with_state(Arc::new(service))
}

/// Binds `addr` and serves lookups until `shutdown` is cancelled.
pub async fn start_lookup_server<S>(
    addr: &str,
    service: LookupService<S>,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error>
where
    S: LocationStore + Send + Sync + 'static,
{
    let app = lookup_router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind lookup server to {}: {}", addr, e))?;
    let local_addr = listener.local_addr()?;

    log::info!("Lookup server listening on http://{}{}", local_addr, LOOKUP_ROUTE);

    let graceful = shutdown.clone();
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { graceful.cancelled().await })
            .into_future(),
    );

    tokio::select! {
        result = &mut server => return flatten_server_result(result),
        _ = shutdown.cancelled() => {}
    }

    log::info!("Shutting down lookup server");
    match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, &mut server).await {
        Ok(result) => flatten_server_result(result),
        Err(_) => {
            log::warn!(
                "Lookup server did not drain within {:?}; aborting open connections",
                SHUTDOWN_GRACE_PERIOD
            );
            server.abort();
            Ok(())
        }
    }
}

fn flatten_server_result(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), anyhow::Error> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(anyhow::anyhow!("Lookup server error: {}", e)),
        Err(e) => Err(anyhow::anyhow!("Lookup server task failed: {}", e)),
    }
}
