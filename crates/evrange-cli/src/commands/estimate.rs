//! Estimate command handler: route distance and charging stops between two
//! positions.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use evrange_lib::config::{
    API_KEY_ENV, CALCULATOR_ENV, ENDPOINT_ENV, REGION_ENV, TIMEOUT_ENV, VEHICLE_RANGE_ENV,
};
use evrange_lib::{
    ErrorKind, ErrorSummary, EstimatorConfig, GeoPosition, LocationServiceClient, TripEstimate,
    TripQuery, TripSession,
};

use evrange_cli::output::{render_failure, render_footer, render_success, OutputFormat};
use evrange_cli::terminal::ColorPalette;

/// Process exit codes for the estimate command.
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const BACKEND_UNAVAILABLE: u8 = 3;
    pub const MALFORMED_RESPONSE: u8 = 4;
}

/// Map an error classification to the exit code reported to the shell.
pub fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::Configuration => exit_codes::INVALID_INPUT,
        ErrorKind::BackendUnavailable => exit_codes::BACKEND_UNAVAILABLE,
        ErrorKind::MalformedResponse => exit_codes::MALFORMED_RESPONSE,
    }
}

/// Routing settings given on the command line; each one overrides the
/// corresponding `EVRANGE_*` variable.
#[derive(Debug, Clone, Default)]
pub struct RoutingOverrides {
    pub region: Option<String>,
    pub calculator: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RoutingOverrides {
    /// Layer these flags over `env`: a flag that is set wins over the
    /// variable it overrides, everything else falls through to `env`.
    fn layered<'a, F>(&'a self, env: F) -> impl Fn(&str) -> Option<String> + 'a
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        move |key: &str| {
            let flag = match key {
                REGION_ENV => self.region.clone(),
                CALCULATOR_ENV => self.calculator.clone(),
                ENDPOINT_ENV => self.endpoint.clone(),
                API_KEY_ENV => self.api_key.clone(),
                TIMEOUT_ENV => self.timeout_secs.map(|secs| secs.to_string()),
                _ => None,
            };
            flag.or_else(|| env(key))
        }
    }
}

/// Arguments for the estimate command.
#[derive(Debug, Clone)]
pub struct EstimateArgs {
    /// Origin as `lat,lng`.
    pub from: String,
    /// Destination as `lat,lng`.
    pub to: String,
    /// Vehicle range override in kilometers.
    pub range_km: Option<f64>,
}

/// Handle the estimate subcommand and return the process exit code.
///
/// Estimate failures are rendered like results (JSON to stdout, text to
/// stderr) and reported through the exit code; only rendering problems
/// surface as `Err`.
pub fn handle_estimate(
    args: &EstimateArgs,
    overrides: &RoutingOverrides,
    format: OutputFormat,
) -> Result<u8> {
    let started = Instant::now();
    let palette = match format {
        OutputFormat::Text => ColorPalette::detect(),
        OutputFormat::Json => ColorPalette::plain(),
    };

    match run_estimate(args, overrides) {
        Ok(trip) => {
            let rendered =
                render_success(&trip, format, &palette).context("failed to render estimate")?;
            print!("{}", rendered);
            if format == OutputFormat::Json {
                println!();
            } else {
                println!("\n{}", render_footer(started.elapsed(), &palette));
            }
            Ok(exit_codes::SUCCESS)
        }
        Err(summary) => {
            let rendered =
                render_failure(&summary, format, &palette).context("failed to render error")?;
            match format {
                OutputFormat::Json => println!("{}", rendered),
                OutputFormat::Text => eprint!("{}", rendered),
            }
            Ok(exit_code_for(summary.kind))
        }
    }
}

fn run_estimate(
    args: &EstimateArgs,
    overrides: &RoutingOverrides,
) -> std::result::Result<TripEstimate, ErrorSummary> {
    let origin = args
        .from
        .parse::<GeoPosition>()
        .map_err(|err| ErrorSummary::from(&err))?;
    let destination = args
        .to
        .parse::<GeoPosition>()
        .map_err(|err| ErrorSummary::from(&err))?;

    // `--range-km` replaces the environment range outright.
    let env = |key: &str| {
        if key == VEHICLE_RANGE_ENV && args.range_km.is_some() {
            return None;
        }
        std::env::var(key).ok()
    };
    let config = EstimatorConfig::from_lookup(overrides.layered(env))
        .map_err(|err| ErrorSummary::from(&err))?;
    debug!(
        endpoint = %config.routing.endpoint_url(),
        calculator = %config.routing.calculator_name,
        timeout_secs = config.routing.timeout.as_secs(),
        "resolved routing configuration"
    );

    let client =
        LocationServiceClient::new(&config.routing).map_err(|err| ErrorSummary::from(&err))?;
    let query = TripQuery::new(origin, destination)
        .with_range_km(args.range_km.unwrap_or(config.vehicle_range_km));

    TripSession::new().request(&client, &query)
}
