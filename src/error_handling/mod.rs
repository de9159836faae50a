//! Error handling.
//!
//! Library errors are `thiserror` enums grouped by concern:
//! - **Initialization**: logger setup
//! - **Database**: pool, migrations, SQL
//! - **Classification**: per-row failures, counted and never surfaced
//! - **Import**: run-ending failures, always paired with partial statistics
//! - **Lookup**: address validation and store failures

mod types;

// Re-export public API
pub use types::{
    ClassifyError, DatabaseError, ImportError, ImportFailure, InitializationError, LookupError,
};
