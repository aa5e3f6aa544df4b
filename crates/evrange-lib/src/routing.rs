use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::GeoPosition;

/// Kilometers per statute mile.
pub const KM_PER_MILE: f64 = 1.609_344;

/// Travel mode sent to the routing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelMode {
    /// Passenger car (drive).
    #[default]
    Car,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Car => f.write_str("Car"),
        }
    }
}

/// Unit a routing backend reports distances in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Convert a distance in this unit to kilometers.
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value,
            DistanceUnit::Miles => value * KM_PER_MILE,
        }
    }
}

/// A single origin/destination routing request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub origin: GeoPosition,
    pub destination: GeoPosition,
    pub travel_mode: TravelMode,
}

impl RouteRequest {
    /// Convenience constructor for drive-mode routes.
    pub fn drive(origin: GeoPosition, destination: GeoPosition) -> Self {
        Self {
            origin,
            destination,
            travel_mode: TravelMode::Car,
        }
    }
}

/// Route summary returned by the backend.
///
/// Fields are optional because the backend contract is only trusted after
/// [`RouteResponse::distance_km`] has checked it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteSummary {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub distance_unit: Option<DistanceUnit>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub data_source: Option<String>,
}

/// Raw backend response. Only the summary is consumed; legs and geometry are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteResponse {
    #[serde(default)]
    pub summary: Option<RouteSummary>,
}

impl RouteResponse {
    /// Build a response carrying a kilometer distance.
    pub fn with_distance_km(distance: f64) -> Self {
        Self {
            summary: Some(RouteSummary {
                distance: Some(distance),
                distance_unit: Some(DistanceUnit::Kilometers),
                ..RouteSummary::default()
            }),
        }
    }

    /// Extract the total route distance in kilometers.
    pub fn distance_km(&self) -> Result<f64> {
        let summary = self
            .summary
            .as_ref()
            .ok_or_else(|| Error::malformed("response has no Summary"))?;
        let distance = summary
            .distance
            .ok_or_else(|| Error::malformed("Summary has no Distance"))?;

        if !distance.is_finite() {
            return Err(Error::malformed(format!(
                "Summary.Distance is not finite: {}",
                distance
            )));
        }
        if distance < 0.0 {
            return Err(Error::malformed(format!(
                "Summary.Distance is negative: {}",
                distance
            )));
        }

        let unit = summary.distance_unit.unwrap_or_default();
        let distance_km = unit.to_km(distance);
        if !distance_km.is_finite() {
            return Err(Error::malformed(format!(
                "Summary.Distance of {} {:?} overflows kilometers",
                distance, unit
            )));
        }
        Ok(distance_km)
    }
}

/// A routing backend able to compute a road route between two positions.
pub trait RouteCalculator {
    /// Name of the calculator, used in logs.
    fn name(&self) -> &str;

    /// Request a route. Transport failures map to
    /// [`Error::BackendUnavailable`], undecodable payloads to
    /// [`Error::MalformedResponse`].
    fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(json: &str) -> RouteResponse {
        serde_json::from_str(json).expect("valid json")
    }

    #[test]
    fn extracts_kilometer_distance() {
        let response = parse(
            r#"{"Legs": [], "Summary": {"Distance": 3944.0, "DistanceUnit": "Kilometers", "DurationSeconds": 140000.5, "DataSource": "Esri"}}"#,
        );
        assert_eq!(response.distance_km().unwrap(), 3944.0);
        assert_eq!(
            response.summary.unwrap().data_source.as_deref(),
            Some("Esri")
        );
    }

    #[test]
    fn converts_miles() {
        let response = parse(r#"{"Summary": {"Distance": 100.0, "DistanceUnit": "Miles"}}"#);
        assert!((response.distance_km().unwrap() - 160.9344).abs() < 1e-9);
    }

    #[test]
    fn missing_unit_defaults_to_kilometers() {
        let response = parse(r#"{"Summary": {"Distance": 12.5}}"#);
        assert_eq!(response.distance_km().unwrap(), 12.5);
    }

    #[test]
    fn missing_summary_or_distance_is_malformed() {
        for json in [r#"{}"#, r#"{"Summary": {}}"#, r#"{"Summary": {"Distance": null}}"#] {
            let err = parse(json).distance_km().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponse, "json {json}");
        }
    }

    #[test]
    fn negative_distance_is_malformed() {
        let err = RouteResponse::with_distance_km(-1.0)
            .distance_km()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn miles_overflowing_kilometers_is_malformed() {
        let response = parse(r#"{"Summary": {"Distance": 1.5e308, "DistanceUnit": "Miles"}}"#);
        let err = response.distance_km().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn travel_mode_serializes_as_backend_string() {
        assert_eq!(serde_json::to_string(&TravelMode::Car).unwrap(), "\"Car\"");
        assert_eq!(
            serde_json::to_string(&DistanceUnit::Kilometers).unwrap(),
            "\"Kilometers\""
        );
    }
}
