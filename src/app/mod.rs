//! Main application modules.
//!
//! This module provides progress logging, shutdown handling, and statistics
//! printing used by the import and serve runs.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_batch_progress;
pub use shutdown::listen_for_shutdown;
pub use statistics::log_import_statistics;
