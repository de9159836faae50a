//! Lookup endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::types::{ApiError, LocationResponse, LookupParams};
use crate::config::CACHE_CONTROL_POLICY;
use crate::error_handling::LookupError;
use crate::lookup::{LocationStore, LookupService};

const MISSING_IP_MESSAGE: &str = "missing mandatory IP address query param";
const NOT_FOUND_MESSAGE: &str = "no location found for the given IP address";
const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// `GET /v1/lookup?ip=<address>`
pub async fn lookup_handler<S>(
    State(service): State<Arc<LookupService<S>>>,
    Query(params): Query<LookupParams>,
) -> Response
where
    S: LocationStore + Send + Sync + 'static,
{
    let ip = match params.ip.as_deref() {
        Some(ip) if !ip.is_empty() => ip,
        _ => return error_response(StatusCode::BAD_REQUEST, MISSING_IP_MESSAGE),
    };

    match service.lookup_location(ip).await {
        Ok(Some(location)) => json_response(StatusCode::OK, &LocationResponse::from(&location)),
        Ok(None) => error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e @ LookupError::BadIpAddressFormat) => {
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        // Already logged by the service; the cause stays server-side.
        Err(LookupError::Database(_)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ApiError {
        http_code: status.as_u16(),
        message: message.to_string(),
    };
    json_response(status, &body)
}

/// Serializes `body` with tab indentation and the lookup cache headers.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let mut buf = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    if let Err(e) = body.serialize(&mut serializer) {
        log::error!("Failed to encode lookup response: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response();
    }
    buf.push(b'\n');

    let mut response = (status, buf).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_POLICY));
    response
}
