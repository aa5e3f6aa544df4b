//! Configuration for the routing backend and the stop estimator.
//!
//! Values come from `EVRANGE_*` environment variables and fall back to the
//! defaults below. Front ends may override individual fields afterwards.

use std::time::Duration;

use crate::error::{Error, Result};

pub const REGION_ENV: &str = "EVRANGE_REGION";
pub const CALCULATOR_ENV: &str = "EVRANGE_CALCULATOR";
pub const API_KEY_ENV: &str = "EVRANGE_API_KEY";
pub const ENDPOINT_ENV: &str = "EVRANGE_ENDPOINT";
pub const TIMEOUT_ENV: &str = "EVRANGE_TIMEOUT_SECS";
pub const VEHICLE_RANGE_ENV: &str = "EVRANGE_VEHICLE_RANGE_KM";

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CALCULATOR: &str = "MyRouteCalculator";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Longest request timeout accepted (one day).
pub const MAX_TIMEOUT_SECS: u64 = 86_400;
/// Vehicle range assumed when none is configured.
pub const DEFAULT_VEHICLE_RANGE_KM: f64 = 300.0;

/// Connection settings for the route calculator service.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    pub region: String,
    pub calculator_name: String,
    pub api_key: Option<String>,
    /// Base URL override; when unset the regional service endpoint is used.
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            calculator_name: DEFAULT_CALCULATOR.to_string(),
            api_key: None,
            endpoint: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RoutingConfig {
    /// Base URL requests are sent to, without a trailing slash.
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://routes.geo.{}.amazonaws.com", self.region),
        }
    }

    /// Reject settings that cannot produce a request.
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(config_error(REGION_ENV, "region must not be empty"));
        }
        if self.calculator_name.trim().is_empty() {
            return Err(config_error(
                CALCULATOR_ENV,
                "calculator name must not be empty",
            ));
        }
        if self.timeout.is_zero() {
            return Err(config_error(TIMEOUT_ENV, "timeout must be positive"));
        }
        if self.timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(config_error(
                TIMEOUT_ENV,
                format!(
                    "timeout must be at most {} seconds, got {}",
                    MAX_TIMEOUT_SECS,
                    self.timeout.as_secs()
                ),
            ));
        }
        Ok(())
    }
}

/// Full estimator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub routing: RoutingConfig,
    pub vehicle_range_km: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            vehicle_range_km: DEFAULT_VEHICLE_RANGE_KM,
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if set. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(region) = get(REGION_ENV) {
            config.routing.region = region;
        }
        if let Some(calculator) = get(CALCULATOR_ENV) {
            config.routing.calculator_name = calculator;
        }
        config.routing.api_key = get(API_KEY_ENV);
        config.routing.endpoint = get(ENDPOINT_ENV);

        if let Some(raw) = get(TIMEOUT_ENV) {
            let secs = raw.parse::<u64>().map_err(|_| {
                config_error(TIMEOUT_ENV, format!("'{}' is not a whole number", raw))
            })?;
            config.routing.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(VEHICLE_RANGE_ENV) {
            let range = raw.parse::<f64>().map_err(|_| {
                config_error(VEHICLE_RANGE_ENV, format!("'{}' is not a number", raw))
            })?;
            config.vehicle_range_km = range;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.routing.validate()?;
        if !self.vehicle_range_km.is_finite() || self.vehicle_range_km <= 0.0 {
            return Err(config_error(
                VEHICLE_RANGE_ENV,
                format!(
                    "vehicle range must be a positive number of kilometers, got {}",
                    self.vehicle_range_km
                ),
            ));
        }
        Ok(())
    }
}

fn config_error(key: &str, message: impl Into<String>) -> Error {
    Error::Configuration {
        key: key.to_string(),
        message: message.into(),
    }
}
