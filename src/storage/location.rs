//! Geolocation queries.

use std::net::IpAddr;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::{Coordinates, GeolocationRecord, StoredGeolocation};

const LOOKUP_LOCATION: &str = "SELECT ip_address, country_code, country, city,
        latitude, longitude, updated_at_ms
    FROM geolocation
    WHERE ip_address = ?
    LIMIT 1";

/// Fetches the stored record for `ip`, or `None` if the address is unknown.
///
/// `ip` is canonicalised first, matching how the classifier keys records.
pub async fn lookup_location(
    pool: &SqlitePool,
    ip: IpAddr,
) -> Result<Option<StoredGeolocation>, DatabaseError> {
    let row = sqlx::query(LOOKUP_LOCATION)
        .bind(ip.to_canonical().to_string())
        .fetch_optional(pool)
        .await?;

    row.map(|row| stored_from_row(&row)).transpose()
}

/// Number of stored records.
pub async fn count_locations(pool: &SqlitePool) -> Result<i64, DatabaseError> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM geolocation")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn stored_from_row(row: &SqliteRow) -> Result<StoredGeolocation, DatabaseError> {
    let ip_text: String = row.try_get("ip_address")?;
    let ip_address = ip_text
        .parse::<IpAddr>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    let latitude: Option<String> = row.try_get("latitude")?;
    let longitude: Option<String> = row.try_get("longitude")?;
    let coordinates = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };

    Ok(StoredGeolocation {
        record: GeolocationRecord {
            ip_address,
            country_code: row.try_get("country_code")?,
            country: row.try_get("country")?,
            city: row.try_get("city")?,
            coordinates,
        },
        updated_at_ms: row.try_get("updated_at_ms")?,
    })
}
