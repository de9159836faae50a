//! Statistics printing.

use log::{info, warn};

use crate::import::ImportStats;

/// Logs the summary of an import run.
///
/// Called on every exit path, so a failed or cancelled run still reports how
/// far it got.
pub fn log_import_statistics(stats: &ImportStats) {
    info!(
        "Import statistics: accepted={}, discarded={}, batches={}, elapsed={:.2}s (~{:.0} records/sec)",
        stats.accepted,
        stats.discarded,
        stats.batches,
        stats.time_elapsed.as_secs_f64(),
        stats.rate_per_second()
    );

    let processed = stats.processed();
    if processed > 0 && stats.discarded > 0 {
        let discard_pct = stats.discarded as f64 / processed as f64 * 100.0;
        if discard_pct >= DISCARD_WARNING_PCT {
            warn!(
                "{:.1}% of rows were discarded; check that the input is a geolocation dump",
                discard_pct
            );
        }
    }
}

/// Share of discarded rows above which the summary adds a warning.
const DISCARD_WARNING_PCT: f64 = 50.0;
