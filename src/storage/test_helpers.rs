//! Shared helpers for unit tests that need a database.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::models::{Coordinates, GeolocationRecord};
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses a single-connection in-memory database so every query sees the same
/// data and rollbacks finish before the next statement runs.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a record with coordinates for `ip`.
pub fn test_record(ip: &str, country_code: &str) -> GeolocationRecord {
    GeolocationRecord {
        ip_address: ip.parse().expect("test IP should parse"),
        country_code: country_code.to_string(),
        country: "Test Country".to_string(),
        city: "Test City".to_string(),
        coordinates: Some(Coordinates {
            latitude: "-49.16675918861615".to_string(),
            longitude: "-86.05920084416894".to_string(),
        }),
    }
}
