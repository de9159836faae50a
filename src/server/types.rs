//! Lookup server request and response types.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::models::StoredGeolocation;

/// Query string of `/v1/lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub ip: Option<String>,
}

/// Error body returned for every non-200 response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub http_code: u16,
    pub message: String,
}

/// JSON body for a found location.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub ip_address: String,
    pub country_code: String,
    pub country: String,
    pub city: String,
    pub latitude: Option<Box<RawValue>>,
    pub longitude: Option<Box<RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<&StoredGeolocation> for LocationResponse {
    fn from(stored: &StoredGeolocation) -> Self {
        let record = &stored.record;
        LocationResponse {
            ip_address: record.ip_address.to_string(),
            country_code: record.country_code.clone(),
            country: record.country.clone(),
            city: record.city.clone(),
            latitude: record.latitude().and_then(coordinate_json),
            longitude: record.longitude().and_then(coordinate_json),
            updated_at: DateTime::from_timestamp_millis(stored.updated_at_ms)
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// Emits the stored coordinate text as a JSON number, digit for digit.
///
/// Text that is numeric but not valid JSON (`+1.5`, `.5`) is emitted as a
/// JSON string instead.
fn coordinate_json(text: &str) -> Option<Box<RawValue>> {
    if text.parse::<f64>().is_ok() {
        if let Ok(raw) = RawValue::from_string(text.to_string()) {
            return Some(raw);
        }
    }
    serde_json::value::to_raw_value(text).ok()
}
