//! Streaming batch importer.
//!
//! Reads a comma-separated dump row by row, classifies each row, and writes
//! accepted records to a [`BatchSink`] in fixed-size batches. Rows that
//! cannot be classified are counted and skipped; decode failures, flush
//! failures and cancellation end the run. Every exit path returns the
//! statistics gathered so far.

mod signal;
mod stats;

use std::io::Read;
use std::num::NonZeroUsize;
use std::time::Instant;

use csv::{ErrorKind, ReaderBuilder, StringRecord};

use crate::app::log_batch_progress;
use crate::classify::classify;
use crate::error_handling::{ImportError, ImportFailure};
use crate::models::GeolocationRecord;
use crate::storage::BatchSink;

pub use signal::StopSignal;
pub use stats::ImportStats;

/// Imports dumps into a [`BatchSink`].
///
/// The importer only holds its batch size; all per-run state lives inside a
/// single [`Importer::stream`] call, so one importer can drive many runs.
#[derive(Debug, Clone)]
pub struct Importer {
    batch_size: NonZeroUsize,
}

impl Importer {
    pub fn new(batch_size: NonZeroUsize) -> Self {
        Importer { batch_size }
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Streams `input` into `sink`.
    ///
    /// Rows have no header and may list their fields in any order. The first
    /// row fixes the expected field count; later rows with a different count
    /// are discarded. The signal is checked before each row, never during a
    /// flush, and a pending partial batch is dropped when the run is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`ImportFailure`] carrying the statistics so far and one of:
    /// - [`ImportError::Decode`] for unreadable input
    /// - [`ImportError::Flush`] when the sink rejects a batch
    /// - [`ImportError::Cancelled`] / [`ImportError::DeadlineExceeded`]
    pub async fn stream<R, S>(
        &self,
        signal: &StopSignal,
        input: R,
        sink: &mut S,
    ) -> Result<ImportStats, ImportFailure>
    where
        R: Read,
        S: BatchSink,
    {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(input);
        self.import_rows(signal, reader.into_records(), sink).await
    }

    /// The import loop over already-decoded rows.
    async fn import_rows<I, S>(
        &self,
        signal: &StopSignal,
        rows: I,
        sink: &mut S,
    ) -> Result<ImportStats, ImportFailure>
    where
        I: IntoIterator<Item = Result<StringRecord, csv::Error>>,
        S: BatchSink,
    {
        let mut run = ImportRun::new(self.batch_size);
        let mut rows = rows.into_iter();

        loop {
            if let Err(e) = signal.check() {
                log::warn!(
                    "Import stopped ({}); dropping {} pending records",
                    e,
                    run.batch.len()
                );
                return Err(run.fail(e));
            }

            let row = match rows.next() {
                None => break,
                Some(Ok(row)) => row,
                Some(Err(e)) if is_field_count_mismatch(&e) => {
                    log::debug!("Discarding row: {e}");
                    run.stats.discarded += 1;
                    continue;
                }
                Some(Err(e)) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    return Err(run.fail(ImportError::Decode { line, source: e }));
                }
            };

            let fields: Vec<&str> = row.iter().collect();
            let record = match classify(&fields) {
                Ok(record) => record,
                Err(e) => {
                    log::debug!(
                        "Discarding row {}: {}",
                        row.position().map(|p| p.line()).unwrap_or(0),
                        e
                    );
                    run.stats.discarded += 1;
                    continue;
                }
            };

            run.batch.push(record);
            run.stats.accepted += 1;

            if run.batch.len() >= self.batch_size.get() {
                if let Err(e) = run.flush(sink).await {
                    return Err(run.fail(e));
                }
            }
        }

        if !run.batch.is_empty() {
            if let Err(e) = run.flush(sink).await {
                return Err(run.fail(e));
            }
        }

        Ok(run.finish())
    }
}

fn is_field_count_mismatch(err: &csv::Error) -> bool {
    matches!(err.kind(), ErrorKind::UnequalLengths { .. })
}

/// State owned by one import run.
struct ImportRun {
    begin: Instant,
    stats: ImportStats,
    batch: Vec<GeolocationRecord>,
    flushed_records: usize,
}

impl ImportRun {
    fn new(batch_size: NonZeroUsize) -> Self {
        ImportRun {
            begin: Instant::now(),
            stats: ImportStats::default(),
            batch: Vec::with_capacity(batch_size.get().min(MAX_PREALLOCATED_BATCH)),
            flushed_records: 0,
        }
    }

    /// Writes the pending batch and starts an empty one.
    async fn flush<S: BatchSink>(&mut self, sink: &mut S) -> Result<(), ImportError> {
        let batch_number = self.stats.batches + 1;
        sink.flush(&self.batch)
            .await
            .map_err(|source| ImportError::Flush {
                batch: batch_number,
                source,
            })?;

        self.stats.batches = batch_number;
        self.flushed_records += self.batch.len();
        self.batch.clear();
        log_batch_progress(batch_number, self.flushed_records, self.begin);
        Ok(())
    }

    fn finish(mut self) -> ImportStats {
        self.stats.time_elapsed = self.begin.elapsed();
        self.stats
    }

    fn fail(self, error: ImportError) -> ImportFailure {
        ImportFailure {
            stats: self.finish(),
            error,
        }
    }
}

const MAX_PREALLOCATED_BATCH: usize = 1 << 16;
