//! geoip_ingest library: geolocation dump ingestion and IP lookups
//!
//! Imports loosely structured, header-less comma-separated geolocation dumps
//! into SQLite and serves point lookups by IP address. Rows may list their
//! fields in any order; [`classify`] infers what each field is, and the
//! [`Importer`] streams classified records into the database in batches.
//!
//! # Example
//!
//! ```no_run
//! use geoip_ingest::{run_import, ImportConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ImportConfig {
//!     file: std::path::PathBuf::from("data_dump.csv"),
//!     ..Default::default()
//! };
//!
//! let report = run_import(config, CancellationToken::new()).await?;
//! println!("accepted {}, discarded {}", report.stats.accepted, report.stats.discarded);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Importing and serving need a Tokio runtime.

mod app;
mod classify;
pub mod config;
mod error_handling;
mod import;
pub mod initialization;
mod lookup;
mod models;
mod run;
mod server;
mod storage;

// Re-export public API
pub use app::listen_for_shutdown;
pub use classify::classify;
pub use config::{ImportConfig, LogFormat, LogLevel, ServeConfig};
pub use error_handling::{
    ClassifyError, DatabaseError, ImportError, ImportFailure, InitializationError, LookupError,
};
pub use import::{ImportStats, Importer, StopSignal};
pub use lookup::{LocationStore, LookupService};
pub use models::{Coordinates, GeolocationRecord, StoredGeolocation};
pub use run::{run_import, run_server, ImportReport};
pub use server::{lookup_router, start_lookup_server, ApiError, LocationResponse};
pub use storage::{
    count_locations, init_db_pool_with_path, lookup_location, run_migrations, BatchSink,
    SqliteSink,
};
