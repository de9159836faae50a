//! Record classification.
//!
//! Dump rows carry no header and no fixed column order, so field meaning is
//! inferred from shape. Each step claims at most one field (or one adjacent
//! pair) and hands the rest to the next step:
//!
//! 1. the first IP literal is the key (mandatory)
//! 2. the first adjacent latitude/longitude pair
//! 3. the first two-letter uppercase token is the country code
//! 4. whatever is left: country, then city
//!
//! The order matters. With more descriptive fields than slots, it decides
//! which leftover lands in `country` and which in `city`.

use std::net::IpAddr;

use crate::error_handling::ClassifyError;
use crate::models::{Coordinates, GeolocationRecord};

/// Literal rejected on either side of a coordinate pair.
///
/// Dumps use `0` as a filler value, so a bare zero is treated as missing data
/// even though it is a valid equator or prime meridian coordinate.
const ZERO_LITERAL: &str = "0";

/// Classifies one row of dump fields into a geolocation record.
///
/// # Errors
///
/// - [`ClassifyError::NoValidIp`] if no field is an IPv4 or IPv6 literal.
/// - [`ClassifyError::NoUsefulData`] if an address was found but country code,
///   country, city and coordinates are all empty.
///
/// # Examples
///
/// ```
/// use geoip_ingest::classify;
///
/// let record = classify(&["200.106.141.15", "SI", "Nepal", "DuBuquemouth",
///     "-84.87503094689836", "7.206435933364332", "7823011346"]).unwrap();
/// assert_eq!(record.ip_address.to_string(), "200.106.141.15");
/// assert_eq!(record.country, "Nepal");
/// assert_eq!(record.city, "DuBuquemouth");
/// assert_eq!(record.latitude(), Some("-84.87503094689836"));
/// ```
pub fn classify<S: AsRef<str>>(fields: &[S]) -> Result<GeolocationRecord, ClassifyError> {
    let fields: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();

    let (ip_address, rest) = take_ip_address(&fields).ok_or(ClassifyError::NoValidIp)?;
    let (coordinates, rest) = take_coordinates(&rest);
    let (country_code, rest) = take_country_code(&rest);

    let mut leftovers = rest.into_iter();
    let country = leftovers.next().unwrap_or_default().to_string();
    let city = leftovers.next().unwrap_or_default().to_string();

    if city.is_empty() && country.is_empty() && country_code.is_empty() && coordinates.is_none()
    {
        return Err(ClassifyError::NoUsefulData);
    }

    Ok(GeolocationRecord {
        ip_address,
        country_code: country_code.to_string(),
        country,
        city,
        coordinates,
    })
}

/// Returns `fields` with the `len` entries starting at `pos` left out.
fn without<'a>(fields: &[&'a str], pos: usize, len: usize) -> Vec<&'a str> {
    fields[..pos]
        .iter()
        .chain(&fields[pos + len..])
        .copied()
        .collect()
}

fn take_ip_address<'a>(fields: &[&'a str]) -> Option<(IpAddr, Vec<&'a str>)> {
    fields.iter().enumerate().find_map(|(pos, field)| {
        field
            .parse::<IpAddr>()
            .ok()
            .map(|ip| (ip.to_canonical(), without(fields, pos, 1)))
    })
}

fn take_coordinates<'a>(fields: &[&'a str]) -> (Option<Coordinates>, Vec<&'a str>) {
    let found = fields.windows(2).position(|pair| {
        is_coordinate(pair[0], LATITUDE_BOUND) && is_coordinate(pair[1], LONGITUDE_BOUND)
    });

    match found {
        Some(pos) => (
            Some(Coordinates {
                latitude: fields[pos].to_string(),
                longitude: fields[pos + 1].to_string(),
            }),
            without(fields, pos, 2),
        ),
        None => (None, fields.to_vec()),
    }
}

fn take_country_code<'a>(fields: &[&'a str]) -> (&'a str, Vec<&'a str>) {
    match fields.iter().position(|field| is_country_code(field)) {
        Some(pos) => (fields[pos], without(fields, pos, 1)),
        None => ("", fields.to_vec()),
    }
}

const LATITUDE_BOUND: f64 = 90.0;
const LONGITUDE_BOUND: f64 = 180.0;

/// A number within `[-bound, bound]` that is not the bare `"0"` filler.
///
/// Parsing only validates the text; the original text is what gets stored.
fn is_coordinate(text: &str, bound: f64) -> bool {
    if text == ZERO_LITERAL {
        return false;
    }
    text.parse::<f64>()
        .map(|value| (-bound..=bound).contains(&value))
        .unwrap_or(false)
}

/// Two uppercase ASCII letters. Not checked against ISO 3166-1.
fn is_country_code(text: &str) -> bool {
    text.len() == 2 && text.bytes().all(|b| b.is_ascii_uppercase())
}
