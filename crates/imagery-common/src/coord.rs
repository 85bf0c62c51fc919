//! Geographic coordinates and their string forms.
//!
//! User input arrives as free text. Parsing validates that each value is a
//! finite decimal within the legal range for its axis, so NaN never reaches
//! the map or the request builder.

use serde::{Deserialize, Serialize};

use crate::{ViewerError, ViewerResult};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A validated WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> ViewerResult<Self> {
        check_range("latitude", lat, MIN_LATITUDE, MAX_LATITUDE, &lat.to_string())?;
        check_range("longitude", lon, MIN_LONGITUDE, MAX_LONGITUDE, &lon.to_string())?;
        Ok(Self { lat, lon })
    }

    /// Parse a point from the raw latitude and longitude input strings.
    pub fn parse(lat: &str, lon: &str) -> ViewerResult<Self> {
        Ok(Self {
            lat: parse_latitude(lat)?,
            lon: parse_longitude(lon)?,
        })
    }

    /// Latitude and longitude rendered with a fixed number of decimals.
    pub fn to_strings(&self, precision: usize) -> (String, String) {
        (
            format_coordinate(self.lat, precision),
            format_coordinate(self.lon, precision),
        )
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

pub fn parse_latitude(raw: &str) -> ViewerResult<f64> {
    parse_coordinate("latitude", raw, MIN_LATITUDE, MAX_LATITUDE)
}

pub fn parse_longitude(raw: &str) -> ViewerResult<f64> {
    parse_coordinate("longitude", raw, MIN_LONGITUDE, MAX_LONGITUDE)
}

/// Fixed-precision decimal string, as written back into the input fields.
pub fn format_coordinate(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

fn parse_coordinate(field: &'static str, raw: &str, min: f64, max: f64) -> ViewerResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ViewerError::InvalidCoordinate {
            field,
            value: raw.to_string(),
            reason: "value is empty".to_string(),
        });
    }

    let value: f64 = trimmed.parse().map_err(|_| ViewerError::InvalidCoordinate {
        field,
        value: raw.to_string(),
        reason: "not a number".to_string(),
    })?;

    check_range(field, value, min, max, raw)?;
    Ok(value)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64, raw: &str) -> ViewerResult<()> {
    if !value.is_finite() {
        return Err(ViewerError::InvalidCoordinate {
            field,
            value: raw.to_string(),
            reason: "not a finite number".to_string(),
        });
    }
    if value < min || value > max {
        return Err(ViewerError::InvalidCoordinate {
            field,
            value: raw.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(())
}
