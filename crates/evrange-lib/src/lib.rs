//! EV range planner library entry points.
//!
//! This crate validates trip endpoints, asks a routing backend for the road
//! distance between them, and turns that distance into a charging stop
//! estimate. Front ends (the CLI, or any other display surface) should depend
//! on the functions exported here instead of reimplementing behavior.
//!
//! ```no_run
//! use evrange_lib::{estimate, EstimatorConfig, GeoPosition, LocationServiceClient, TripQuery};
//!
//! let config = EstimatorConfig::from_env()?;
//! let client = LocationServiceClient::new(&config.routing)?;
//! let query = TripQuery::new(
//!     GeoPosition::new(40.7128, -74.0060)?,
//!     GeoPosition::new(34.0522, -118.2437)?,
//! )
//! .with_range_km(config.vehicle_range_km);
//! let trip = estimate(&client, &query)?;
//! println!("{} km, {} stops", trip.distance_km, trip.stops);
//! # Ok::<(), evrange_lib::Error>(())
//! ```

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod estimate;
pub mod geo;
pub mod location;
pub mod output;
pub mod routing;
pub mod session;

pub use config::{EstimatorConfig, RoutingConfig, DEFAULT_VEHICLE_RANGE_KM};
pub use error::{Error, ErrorKind, Result};
pub use estimate::{estimate, stops_for_distance, TripEstimate, TripQuery};
pub use geo::GeoPosition;
pub use location::LocationServiceClient;
pub use output::{render_estimate_text, DisplayView, ErrorEnvelope, ErrorSummary, TripSummary};
pub use routing::{
    DistanceUnit, RouteCalculator, RouteRequest, RouteResponse, RouteSummary, TravelMode,
};
pub use session::{EstimateState, RequestTicket, TripSession};
