//! Import statistics.

use std::time::Duration;

/// Counters for one import run.
///
/// Returned on every exit path, including failures, so callers can report
/// partial progress without inspecting the error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Records classified and placed into a batch
    pub accepted: usize,
    /// Rows rejected by the decoder (field count) or the classifier
    pub discarded: usize,
    /// Batches written successfully
    pub batches: usize,
    /// Wall-clock time of the whole run
    pub time_elapsed: Duration,
}

impl ImportStats {
    /// Rows that reached a decision, accepted or discarded.
    pub fn processed(&self) -> usize {
        self.accepted + self.discarded
    }

    /// Accepted rows per second over the whole run.
    pub fn rate_per_second(&self) -> f64 {
        let secs = self.time_elapsed.as_secs_f64();
        if secs > 0.0 {
            self.accepted as f64 / secs
        } else {
            0.0
        }
    }
}
