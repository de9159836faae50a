//! Configuration constants.
//!
//! This module defines the defaults used by the importer, the storage layer
//! and the lookup server.

use std::time::Duration;

/// Default number of records written per flush.
///
/// Large batches keep the number of transactions low; SQLite handles
/// tens of thousands of upserts per transaction comfortably.
pub const DEFAULT_BATCH_SIZE: usize = 25_000;

/// Default SQLite database path.
pub const DB_PATH: &str = "./geolocation.db";

/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "GEOIP_INGEST_DB_PATH";

/// Default address for the lookup server.
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";

/// Path of the lookup endpoint.
pub const LOOKUP_ROUTE: &str = "/v1/lookup";

/// Cache policy attached to every lookup response.
pub const CACHE_CONTROL_POLICY: &str = "max-age=3600, public";

/// Grace period given to in-flight lookups once shutdown starts.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(3);
