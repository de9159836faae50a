//! One import run from a dump file (or stdin) into the SQLite database.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::app::log_import_statistics;
use crate::config::ImportConfig;
use crate::import::{ImportStats, Importer, StopSignal};
use crate::storage::{
    checkpoint_wal, count_locations, init_db_pool_with_path, run_migrations, SqliteSink,
};

/// Results of a completed import.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Counters gathered by the importer
    pub stats: ImportStats,
    /// Rows in the location table after the import
    pub stored_locations: i64,
    /// Database the records were written to
    pub db_path: PathBuf,
}

/// Imports `config.file` into `config.db_path`.
///
/// Statistics are logged whether or not the import succeeds. On failure the
/// returned error wraps an [`crate::ImportFailure`] which still carries them.
pub async fn run_import(config: ImportConfig, shutdown: CancellationToken) -> Result<ImportReport> {
    let input = open_input(&config.file)?;

    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let mut signal = StopSignal::new(shutdown);
    if let Some(secs) = config.timeout_seconds {
        signal = signal.with_timeout(Duration::from_secs(secs));
    }

    log::info!(
        "Importing {} into {} (batch size {})",
        config.file.display(),
        config.db_path.display(),
        config.batch_size
    );

    let importer = Importer::new(config.batch_size);
    let mut sink = SqliteSink::new(pool.as_ref().clone());
    let outcome = importer.stream(&signal, input, &mut sink).await;

    let stats = match &outcome {
        Ok(stats) => stats,
        Err(failure) => &failure.stats,
    };
    log_import_statistics(stats);
    checkpoint_wal(&pool).await;

    let stats = outcome.context("Import failed")?;
    let stored_locations = count_locations(&pool)
        .await
        .context("Failed to count stored locations")?;
    pool.close().await;

    Ok(ImportReport {
        stats,
        stored_locations,
        db_path: config.db_path,
    })
}

fn open_input(path: &Path) -> Result<Box<dyn Read + Send>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::num::NonZeroUsize;

    use crate::error_handling::{ImportError, ImportFailure};

    fn write_dump(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("dump.csv");
        let mut file = File::create(&path).expect("Failed to create dump");
        file.write_all(contents.as_bytes())
            .expect("Failed to write dump");
        path
    }

    fn config(dir: &Path, file: PathBuf) -> ImportConfig {
        ImportConfig {
            file,
            db_path: dir.join("geo.db"),
            batch_size: NonZeroUsize::new(2).expect("non-zero"),
            timeout_seconds: None,
        }
    }

    #[tokio::test]
    async fn test_run_import_reports_stored_rows() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dump = write_dump(
            dir.path(),
            "1.0.0.1,AU,Australia,Sydney,-33.86,151.20,1\n\
             garbage,,,,,,\n\
             1.0.0.2,NZ,New Zealand,Auckland,-36.84,174.76,2\n\
             1.0.0.1,AU,Australia,Melbourne,-37.81,144.96,3\n",
        );

        let report = run_import(config(dir.path(), dump), CancellationToken::new())
            .await
            .expect("import should succeed");

        assert_eq!(report.stats.accepted, 3);
        assert_eq!(report.stats.discarded, 1);
        assert_eq!(report.stats.batches, 2);
        assert_eq!(report.stored_locations, 2);
        assert!(report.db_path.exists());
    }

    #[tokio::test]
    async fn test_run_import_with_out_of_range_timeout() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dump = write_dump(dir.path(), "1.0.0.1,AU,Australia,Sydney,-33.86,151.20,1\n");
        let mut cfg = config(dir.path(), dump);
        cfg.timeout_seconds = Some(u64::MAX);

        let report = run_import(cfg, CancellationToken::new())
            .await
            .expect("an unrepresentable timeout should not stop the import");
        assert_eq!(report.stats.accepted, 1);
    }

    #[tokio::test]
    async fn test_run_import_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cfg = config(dir.path(), dir.path().join("absent.csv"));
        let db_path = cfg.db_path.clone();

        let err = run_import(cfg, CancellationToken::new())
            .await
            .expect_err("missing input should fail");

        assert!(format!("{err:#}").contains("Failed to open input file"));
        assert!(!db_path.exists(), "no database should be created");
    }

    #[tokio::test]
    async fn test_run_import_cancelled_keeps_stats() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dump = write_dump(dir.path(), "1.0.0.1,AU,Australia,Sydney,-33.86,151.20,1\n");
        let token = CancellationToken::new();
        token.cancel();

        let err = run_import(config(dir.path(), dump), token)
            .await
            .expect_err("cancelled import should fail");

        let failure = err
            .downcast_ref::<ImportFailure>()
            .expect("error should carry import statistics");
        assert!(matches!(failure.error, ImportError::Cancelled));
        assert_eq!(failure.stats.accepted, 0);
    }
}
