//! Geolocation data types.

use std::net::IpAddr;

/// Latitude and longitude exactly as they appeared in the dump.
///
/// Both values are kept as text so the digits survive storage and lookup
/// unchanged; `-49.16675918861615` is never re-rendered through `f64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// A classified geolocation row, keyed by IP address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeolocationRecord {
    /// Canonical address (IPv4-mapped IPv6 literals are stored as IPv4)
    pub ip_address: IpAddr,
    /// Empty or two uppercase ASCII letters
    pub country_code: String,
    pub country: String,
    pub city: String,
    /// `None` when the row had no usable coordinate pair
    pub coordinates: Option<Coordinates>,
}

impl GeolocationRecord {
    /// Latitude text, if the record has coordinates.
    pub fn latitude(&self) -> Option<&str> {
        self.coordinates.as_ref().map(|c| c.latitude.as_str())
    }

    /// Longitude text, if the record has coordinates.
    pub fn longitude(&self) -> Option<&str> {
        self.coordinates.as_ref().map(|c| c.longitude.as_str())
    }
}

/// A geolocation row as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGeolocation {
    pub record: GeolocationRecord,
    /// Last upsert time, milliseconds since Unix epoch
    pub updated_at_ms: i64,
}
