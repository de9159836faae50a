//! Process-level entry points used by the binary and by embedding callers.

mod import;
mod serve;

pub use import::{run_import, ImportReport};
pub use serve::run_server;
