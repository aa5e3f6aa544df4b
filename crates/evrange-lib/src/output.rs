use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, ErrorKind};
use crate::estimate::TripEstimate;

/// Payload handed to display layers on success.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub distance_km: f64,
    pub stops: u64,
}

impl From<&TripEstimate> for TripSummary {
    fn from(estimate: &TripEstimate) -> Self {
        Self {
            distance_km: estimate.distance_km,
            stops: estimate.stops,
        }
    }
}

/// Error indicator handed to display layers on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for ErrorSummary {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// `{"error": {...}}` wrapper used for JSON renderings.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub error: &'a ErrorSummary,
}

/// What a display surface should currently show.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayView {
    /// No estimate has been requested yet.
    Empty,
    /// A request is in flight; the last success (if any) may stay visible.
    Pending { previous: Option<TripSummary> },
    Trip(TripSummary),
    /// The latest request failed. Earlier figures are not shown.
    Error(ErrorSummary),
}

/// Render an estimate the way the planner UI shows it.
pub fn render_estimate_text(estimate: &TripEstimate) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "Total Distance: {:.2} km", estimate.distance_km);
    let _ = writeln!(
        buffer,
        "Estimated Stops: {} (Assuming {}km range)",
        estimate.stops, estimate.vehicle_range_km
    );
    buffer
}
