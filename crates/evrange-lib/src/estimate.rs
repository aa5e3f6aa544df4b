//! Charging stop estimation from a single road-route distance.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_VEHICLE_RANGE_KM;
use crate::error::{Error, Result};
use crate::geo::GeoPosition;
use crate::routing::{RouteCalculator, RouteRequest};

/// Inputs for one estimate. Positions may be absent until the resolver has
/// produced them; `vehicle_range_km` falls back to 300 km.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripQuery {
    pub origin: Option<GeoPosition>,
    pub destination: Option<GeoPosition>,
    pub vehicle_range_km: Option<f64>,
}

impl TripQuery {
    pub fn new(origin: GeoPosition, destination: GeoPosition) -> Self {
        Self {
            origin: Some(origin),
            destination: Some(destination),
            vehicle_range_km: None,
        }
    }

    pub fn with_range_km(mut self, range_km: f64) -> Self {
        self.vehicle_range_km = Some(range_km);
        self
    }

    /// Check preconditions and build the drive request plus effective range.
    pub fn validate(&self) -> Result<(RouteRequest, f64)> {
        let origin = self
            .origin
            .ok_or_else(|| Error::invalid_input("origin position is missing"))?;
        let destination = self
            .destination
            .ok_or_else(|| Error::invalid_input("destination position is missing"))?;
        let range_km = validate_range(self.vehicle_range_km.unwrap_or(DEFAULT_VEHICLE_RANGE_KM))?;
        Ok((RouteRequest::drive(origin, destination), range_km))
    }
}

/// Distance and stop count for one trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripEstimate {
    pub distance_km: f64,
    pub stops: u64,
    pub vehicle_range_km: f64,
}

/// Number of charging stops needed to cover `distance_km` with a vehicle of
/// `range_km`, rounding any partial range up.
///
/// # Examples
/// ```
/// use evrange_lib::stops_for_distance;
///
/// assert_eq!(stops_for_distance(3944.0, 300.0).unwrap(), 14);
/// assert_eq!(stops_for_distance(300.0, 300.0).unwrap(), 1);
/// assert_eq!(stops_for_distance(0.0, 300.0).unwrap(), 0);
/// ```
pub fn stops_for_distance(distance_km: f64, range_km: f64) -> Result<u64> {
    let range_km = validate_range(range_km)?;
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Error::invalid_input(format!(
            "distance must be a non-negative number of kilometers, got {}",
            distance_km
        )));
    }
    // Float-to-int `as` saturates, so absurd ratios clamp to u64::MAX.
    Ok((distance_km / range_km).ceil() as u64)
}

fn validate_range(range_km: f64) -> Result<f64> {
    if !range_km.is_finite() || range_km <= 0.0 {
        return Err(Error::invalid_input(format!(
            "vehicle range must be a positive number of kilometers, got {}",
            range_km
        )));
    }
    Ok(range_km)
}

/// Request a route for `query` and derive its charging stop estimate.
///
/// Preconditions are checked before any backend call; a query missing either
/// position fails with [`Error::InvalidInput`] without touching `calculator`.
/// The backend is called exactly once and failures are never retried.
pub fn estimate<C>(calculator: &C, query: &TripQuery) -> Result<TripEstimate>
where
    C: RouteCalculator + ?Sized,
{
    let (request, range_km) = query.validate()?;

    info!(
        calculator = calculator.name(),
        origin = %request.origin,
        destination = %request.destination,
        travel_mode = %request.travel_mode,
        "requesting route"
    );

    let response = calculator.calculate_route(&request).inspect_err(|err| {
        warn!(calculator = calculator.name(), error = %err, "route request failed");
    })?;

    let distance_km = response.distance_km().inspect_err(|err| {
        warn!(calculator = calculator.name(), error = %err, "unusable route response");
    })?;
    let stops = stops_for_distance(distance_km, range_km)?;

    debug!(distance_km, range_km, stops, "estimated charging stops");

    Ok(TripEstimate {
        distance_km,
        stops,
        vehicle_range_km: range_km,
    })
}
