//! Progress logging utilities.

use log::info;
use std::time::Instant;

/// Logs progress after a batch has been written.
///
/// # Arguments
///
/// * `batch` - 1-based number of the batch just written
/// * `total` - Records written so far, including this batch
/// * `start_time` - When the import started
pub fn log_batch_progress(batch: usize, total: usize, start_time: Instant) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        total as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Batch {} processed: {} records written in {:.2} seconds (~{:.0} records/sec)",
        batch, total, elapsed_secs, rate
    );
}
