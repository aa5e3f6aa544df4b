//! Geographic positions handed over by the place resolver.
//!
//! A [`GeoPosition`] can only be built through validation, so every value in
//! circulation is finite and inside the WGS84 latitude/longitude bounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A validated `(latitude, longitude)` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct GeoPosition {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPosition {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPosition> for GeoPosition {
    type Error = Error;

    fn try_from(raw: RawPosition) -> Result<Self> {
        GeoPosition::new(raw.latitude, raw.longitude)
    }
}

impl GeoPosition {
    /// Build a position, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !LATITUDE_RANGE.contains(&latitude) {
            return Err(Error::invalid_input(format!(
                "latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !LONGITUDE_RANGE.contains(&longitude) {
            return Err(Error::invalid_input(format!(
                "longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Position in `[longitude, latitude]` order, as routing backends expect.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses the `"lat,lng"` text produced by place autocomplete.
impl FromStr for GeoPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("position text is empty"));
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let [lat, lng] = parts.as_slice() else {
            return Err(Error::invalid_input(format!(
                "expected 'lat,lng' but got '{}'",
                trimmed
            )));
        };

        let latitude = parse_coordinate(lat, "latitude")?;
        let longitude = parse_coordinate(lng, "longitude")?;
        GeoPosition::new(latitude, longitude)
    }
}

fn parse_coordinate(raw: &str, label: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| Error::invalid_input(format!("{} '{}' is not a number", label, raw)))
}
