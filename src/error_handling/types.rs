//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

use crate::import::ImportStats;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Reasons a row cannot be turned into a geolocation record.
///
/// These never escape the importer; they only feed the discard counter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// No field parses as an IPv4 or IPv6 literal.
    #[error("no valid IP address found")]
    NoValidIp,

    /// An IP address was found but nothing else worth keeping.
    #[error("no useful data found")]
    NoUsefulData,
}

/// Errors that end an import run.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input could not be decoded (anything other than a field count mismatch).
    #[error("cannot decode row {line}: {source}")]
    Decode {
        /// 1-based line of the offending row, when known
        line: u64,
        /// Underlying decoder error
        source: csv::Error,
    },

    /// A batch could not be written.
    #[error("batch {batch} error: {source}")]
    Flush {
        /// 1-based sequence number of the failed flush
        batch: usize,
        /// Underlying storage error
        source: DatabaseError,
    },

    /// The run was cancelled by the caller.
    #[error("import cancelled")]
    Cancelled,

    /// The run deadline passed.
    #[error("import deadline exceeded")]
    DeadlineExceeded,
}

/// An import that ended early, with the statistics gathered up to that point.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct ImportFailure {
    /// Statistics accumulated before the failure
    pub stats: ImportStats,
    /// What stopped the run
    #[source]
    pub error: ImportError,
}

/// Errors returned by the lookup facade.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The caller passed something that is not an IP address.
    #[error("invalid IP address format")]
    BadIpAddressFormat,

    /// The store could not answer.
    #[error("cannot get location from database")]
    Database(#[from] DatabaseError),
}
