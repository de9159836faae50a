//! SQLite storage: pool setup, migrations, the batch sink and lookups.

pub mod location;
pub mod migrations;
pub mod pool;
pub mod sink;
#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use location::{count_locations, lookup_location};
pub use migrations::run_migrations;
pub use pool::{checkpoint_wal, init_db_pool_with_path};
pub use sink::{BatchSink, SqliteSink};
