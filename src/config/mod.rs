//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (batch size, paths, HTTP settings)
//! - Library configuration structs
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Command, ImportArgs, ImportConfig, LogFormat, LogLevel, Opt, ServeArgs, ServeConfig,
};
