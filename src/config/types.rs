//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{DB_PATH, DB_PATH_ENV, DEFAULT_BATCH_SIZE, DEFAULT_HTTP_ADDR};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Import configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use geoip_ingest::ImportConfig;
/// use std::path::PathBuf;
///
/// let config = ImportConfig {
///     file: PathBuf::from("data_dump.csv"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Dump to read; `-` reads from stdin
    pub file: PathBuf,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Records per flush
    pub batch_size: NonZeroUsize,

    /// Abort the import after this many seconds (unbounded when `None`)
    pub timeout_seconds: Option<u64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("data_dump.csv"),
            db_path: PathBuf::from(DB_PATH),
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            timeout_seconds: None,
        }
    }
}

/// Lookup server configuration.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Address to listen on
    pub http_addr: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Import a dump in batches of 10k records
/// geoip_ingest import --file data_dump.csv --batch-size 10000
///
/// # Serve lookups from the same database
/// geoip_ingest serve --http 0.0.0.0:8080
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "geoip_ingest",
    about = "Imports IP geolocation dumps into SQLite and serves lookups by IP address."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a comma-separated geolocation dump into the database
    Import(ImportArgs),
    /// Serve geolocation lookups over HTTP
    Serve(ServeArgs),
}

/// Options for `import`.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Data dump file (`-` for stdin)
    #[arg(long, default_value = "data_dump.csv")]
    pub file: PathBuf,

    /// Database path (SQLite file)
    #[arg(long, env = DB_PATH_ENV, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Number of records written per transaction
    #[arg(long, default_value_t = NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN))]
    pub batch_size: NonZeroUsize,

    /// Abort the import after this many seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

impl From<ImportArgs> for ImportConfig {
    fn from(args: ImportArgs) -> Self {
        Self {
            file: args.file,
            db_path: args.db_path,
            batch_size: args.batch_size,
            timeout_seconds: args.timeout_seconds,
        }
    }
}

/// Options for `serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// HTTP service address to listen for incoming requests on
    #[arg(long = "http", default_value = DEFAULT_HTTP_ADDR)]
    pub http_addr: String,

    /// Database path (SQLite file)
    #[arg(long, env = DB_PATH_ENV, default_value = DB_PATH)]
    pub db_path: PathBuf,
}

impl From<ServeArgs> for ServeConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            db_path: args.db_path,
            http_addr: args.http_addr,
        }
    }
}
