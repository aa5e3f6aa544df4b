use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use evrange_cli::logging::{init_tracing, LogFormat};
use evrange_cli::output::OutputFormat;

mod commands;

use commands::estimate::{exit_codes, handle_estimate, EstimateArgs, RoutingOverrides};

#[derive(Parser, Debug)]
#[command(author, version, about = "EV charging stop estimator")]
struct Cli {
    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(flatten)]
    routing: RoutingArgs,

    #[command(subcommand)]
    command: Command,
}

/// Routing backend settings; each flag overrides its `EVRANGE_*` variable.
#[derive(Args, Debug)]
struct RoutingArgs {
    /// Backend region (EVRANGE_REGION).
    #[arg(long, global = true)]
    region: Option<String>,

    /// Route calculator name (EVRANGE_CALCULATOR).
    #[arg(long, global = true)]
    calculator: Option<String>,

    /// Endpoint base URL override (EVRANGE_ENDPOINT).
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// API key sent with each request (EVRANGE_API_KEY).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Request timeout in seconds (EVRANGE_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

impl From<RoutingArgs> for RoutingOverrides {
    fn from(args: RoutingArgs) -> Self {
        Self {
            region: args.region,
            calculator: args.calculator,
            endpoint: args.endpoint,
            api_key: args.api_key,
            timeout_secs: args.timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate route distance and charging stops between two positions.
    Estimate {
        /// Origin as `lat,lng`.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: String,
        /// Destination as `lat,lng`.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: String,
        /// Vehicle range in kilometers (EVRANGE_VEHICLE_RANGE_KM, default 300).
        #[arg(long = "range-km", allow_hyphen_values = true)]
        range_km: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let format = cli.format;
    let overrides = RoutingOverrides::from(cli.routing);

    let result = match cli.command {
        Command::Estimate { from, to, range_km } => handle_estimate(
            &EstimateArgs { from, to, range_km },
            &overrides,
            format,
        ),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}
