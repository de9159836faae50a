//! Batch sinks.
//!
//! The importer hands each full batch to a [`BatchSink`]. The SQLite sink
//! writes the whole batch in one transaction so a batch is either fully
//! applied or not at all.

use std::future::Future;

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::models::GeolocationRecord;

/// Durable destination for batches of classified records.
///
/// Implementations must upsert by IP address: a repeated address overwrites
/// every other field of the earlier record, whether the repeat is in the same
/// batch or a later one. `Ok` means every record in the batch is durable.
pub trait BatchSink {
    fn flush(
        &mut self,
        batch: &[GeolocationRecord],
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;
}

const UPSERT_LOCATION: &str = "INSERT INTO geolocation (
        ip_address, country_code, country, city, latitude, longitude, updated_at_ms
    ) VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(ip_address) DO UPDATE SET
        country_code=excluded.country_code,
        country=excluded.country,
        city=excluded.city,
        latitude=excluded.latitude,
        longitude=excluded.longitude,
        updated_at_ms=excluded.updated_at_ms";

/// Writes batches into the `geolocation` table.
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteSink { pool }
    }
}

impl BatchSink for SqliteSink {
    async fn flush(&mut self, batch: &[GeolocationRecord]) -> Result<(), DatabaseError> {
        log::debug!("Flushing batch of {} records to database", batch.len());

        let updated_at_ms = chrono::Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await?;

        for record in batch {
            sqlx::query(UPSERT_LOCATION)
                .bind(record.ip_address.to_string())
                .bind(&record.country_code)
                .bind(&record.country)
                .bind(&record.city)
                .bind(record.latitude())
                .bind(record.longitude())
                .bind(updated_at_ms)
                .execute(&mut *tx)
                .await?;
        }

        // Dropping `tx` without commit rolls the whole batch back.
        tx.commit().await?;
        Ok(())
    }
}
