//! End-to-end import tests against an on-disk database.

mod helpers;

use std::net::IpAddr;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use geoip_ingest::{
    count_locations, init_db_pool_with_path, lookup_location, run_import, BatchSink, ImportError,
    ImportFailure, Importer, SqliteSink, StopSignal,
};
use helpers::{
    fixture_path, import_config, import_fixture, write_dump, FIXTURE_ACCEPTED, FIXTURE_DISCARDED,
};

fn ip(text: &str) -> IpAddr {
    text.parse().expect("test IP should parse")
}

#[tokio::test]
async fn test_fixture_import_counts() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = import_fixture(dir.path()).await;

    assert_eq!(report.stats.accepted, FIXTURE_ACCEPTED);
    assert_eq!(report.stats.discarded, FIXTURE_DISCARDED);
    assert_eq!(report.stats.batches, 3);
    assert_eq!(report.stored_locations, FIXTURE_ACCEPTED as i64);
    assert_eq!(report.db_path, dir.path().join("geo.db"));
}

#[tokio::test]
async fn test_coordinates_survive_byte_for_byte() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = import_fixture(dir.path()).await;

    let pool = init_db_pool_with_path(&report.db_path)
        .await
        .expect("Failed to open database");
    let stored = lookup_location(&pool, ip("160.103.7.140"))
        .await
        .expect("lookup should succeed")
        .expect("location should exist");

    assert_eq!(stored.record.latitude(), Some("-68.31023296602508"));
    assert_eq!(stored.record.longitude(), Some("-37.62435199624531"));
    assert_eq!(stored.record.country_code, "CZ");
    assert_eq!(stored.record.country, "Nicaragua");
    assert_eq!(stored.record.city, "New Neva");
}

#[tokio::test]
async fn test_ipv6_and_mapped_addresses() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = import_fixture(dir.path()).await;
    let pool = init_db_pool_with_path(&report.db_path)
        .await
        .expect("Failed to open database");

    let v6 = lookup_location(&pool, ip("2001:db8::1"))
        .await
        .expect("lookup should succeed")
        .expect("IPv6 location should exist");
    assert_eq!(v6.record.city, "Berlin");

    let mapped = lookup_location(&pool, ip("::ffff:160.103.7.140"))
        .await
        .expect("lookup should succeed");
    assert!(mapped.is_some(), "IPv4-mapped form should find the IPv4 row");
}

#[tokio::test]
async fn test_reimport_last_write_wins() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    import_fixture(dir.path()).await;

    let update = write_dump(
        dir.path(),
        "update.csv",
        "160.103.7.140,CZ,Nicaragua,Old Neva,-1.5,2.25,1\n",
    );
    let report = run_import(import_config(dir.path(), update, 10), CancellationToken::new())
        .await
        .expect("second import should succeed");

    assert_eq!(report.stats.accepted, 1);
    assert_eq!(report.stored_locations, FIXTURE_ACCEPTED as i64);

    let pool = init_db_pool_with_path(&report.db_path)
        .await
        .expect("Failed to open database");
    let stored = lookup_location(&pool, ip("160.103.7.140"))
        .await
        .expect("lookup should succeed")
        .expect("location should exist");
    assert_eq!(stored.record.city, "Old Neva");
    assert_eq!(stored.record.latitude(), Some("-1.5"));
    assert_eq!(stored.record.longitude(), Some("2.25"));
}

#[tokio::test]
async fn test_same_ip_twice_in_one_dump() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let dump = write_dump(
        dir.path(),
        "dupes.csv",
        "10.1.1.1,FR,France,Paris,48.85,2.35,1\n\
         10.1.1.1,FR,France,Lyon,45.76,4.83,2\n",
    );

    let report = run_import(import_config(dir.path(), dump, 1), CancellationToken::new())
        .await
        .expect("import should succeed");
    assert_eq!(report.stats.accepted, 2);
    assert_eq!(report.stored_locations, 1);

    let pool = init_db_pool_with_path(&report.db_path)
        .await
        .expect("Failed to open database");
    let stored = lookup_location(&pool, ip("10.1.1.1"))
        .await
        .expect("lookup should succeed")
        .expect("location should exist");
    assert_eq!(stored.record.city, "Lyon");
}

#[tokio::test]
async fn test_importer_with_sqlite_sink_directly() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = init_db_pool_with_path(&dir.path().join("direct.db"))
        .await
        .expect("Failed to open database");
    geoip_ingest::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let input = std::fs::File::open(fixture_path()).expect("Failed to open fixture");
    let mut sink = SqliteSink::new(pool.as_ref().clone());
    let importer = Importer::new(std::num::NonZeroUsize::new(3).expect("non-zero"));

    let stats = importer
        .stream(&StopSignal::default(), input, &mut sink)
        .await
        .expect("import should succeed");
    assert_eq!(stats.accepted, FIXTURE_ACCEPTED);
    assert_eq!(stats.batches, 2);

    // Flushing an empty batch is a no-op.
    sink.flush(&[]).await.expect("empty flush should succeed");
    assert_eq!(
        count_locations(&pool).await.expect("count should succeed"),
        FIXTURE_ACCEPTED as i64
    );
}

#[tokio::test]
async fn test_timeout_zero_stops_before_first_row() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = import_config(dir.path(), fixture_path(), 2);
    config.timeout_seconds = Some(0);

    let err = run_import(config, CancellationToken::new())
        .await
        .expect_err("zero timeout should stop the import");
    let failure = err
        .downcast_ref::<ImportFailure>()
        .expect("error should carry statistics");

    assert!(matches!(failure.error, ImportError::DeadlineExceeded));
    assert_eq!(failure.stats.accepted, 0);
}
