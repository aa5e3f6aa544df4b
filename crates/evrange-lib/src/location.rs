//! HTTP client for the Amazon Location Service route calculator.
//!
//! Requests go to
//! `{endpoint}/routes/v0/calculators/{name}/calculate/route`, authenticated
//! with an optional API key passed as the `key` query parameter.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RoutingConfig;
use crate::error::{Error, Result};
use crate::routing::{DistanceUnit, RouteCalculator, RouteRequest, RouteResponse, TravelMode};

/// Request body for `CalculateRoute`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CalculateRouteBody {
    departure_position: [f64; 2],
    destination_position: [f64; 2],
    travel_mode: TravelMode,
    distance_unit: DistanceUnit,
}

impl From<&RouteRequest> for CalculateRouteBody {
    fn from(request: &RouteRequest) -> Self {
        Self {
            departure_position: request.origin.to_lon_lat(),
            destination_position: request.destination.to_lon_lat(),
            travel_mode: request.travel_mode,
            distance_unit: DistanceUnit::Kilometers,
        }
    }
}

/// Route calculator backed by the Amazon Location Service REST API.
#[derive(Debug, Clone)]
pub struct LocationServiceClient {
    client: Client,
    url: Url,
    calculator_name: String,
}

impl LocationServiceClient {
    /// Build a client from routing configuration. No request is made.
    pub fn new(config: &RoutingConfig) -> Result<Self> {
        config.validate()?;

        let url = route_url(config)?;
        if config.api_key.is_none() && config.endpoint.is_none() {
            warn!(
                region = %config.region,
                "no API key configured; the regional endpoint will likely reject requests"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()
            .map_err(|err| Error::unavailable("failed to build HTTP client", err))?;

        Ok(Self {
            client,
            url,
            calculator_name: config.calculator_name.clone(),
        })
    }

    /// Fully resolved request URL, including the API key when configured.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl RouteCalculator for LocationServiceClient {
    fn name(&self) -> &str {
        &self.calculator_name
    }

    fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        let body = CalculateRouteBody::from(request);

        let response = self
            .client
            .post(self.url.clone())
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .map_err(|err| {
                let message = if err.is_timeout() {
                    "request timed out"
                } else if err.is_connect() {
                    "could not connect"
                } else {
                    "request failed"
                };
                Error::unavailable(message, err)
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| Error::unavailable("failed to read response body", err))?;

        if !status.is_success() {
            debug!(status = %status, body = %text, "route calculator returned an error status");
            return Err(Error::BackendUnavailable {
                message: format!("calculator {} returned HTTP {}", self.calculator_name, status),
                source: None,
            });
        }

        serde_json::from_str::<RouteResponse>(&text)
            .map_err(|err| Error::malformed(format!("response is not valid route JSON: {}", err)))
    }
}

fn route_url(config: &RoutingConfig) -> Result<Url> {
    let raw = format!(
        "{}/routes/v0/calculators/{}/calculate/route",
        config.endpoint_url(),
        config.calculator_name
    );
    let mut url = Url::parse(&raw).map_err(|err| Error::Configuration {
        key: crate::config::ENDPOINT_ENV.to_string(),
        message: format!("'{}' is not a valid URL: {}", raw, err),
    })?;

    if let Some(key) = &config.api_key {
        url.query_pairs_mut().append_pair("key", key);
    }
    Ok(url)
}

fn user_agent() -> String {
    format!("evrange-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}
