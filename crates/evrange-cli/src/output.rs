//! Output formatting for estimate results.
//!
//! Text output mirrors the planner UI wording; JSON output is the display
//! payload (`{"distanceKm", "stops"}`) or an `{"error": {...}}` envelope.

use std::time::Duration;

use clap::ValueEnum;

use evrange_lib::{render_estimate_text, ErrorEnvelope, ErrorSummary, TripEstimate, TripSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON display payload.
    Json,
}

/// Render a successful estimate.
pub fn render_success(
    trip: &TripEstimate,
    format: OutputFormat,
    palette: &ColorPalette,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&TripSummary::from(trip)),
        OutputFormat::Text if palette.reset.is_empty() => Ok(render_estimate_text(trip)),
        OutputFormat::Text => {
            let stops_color = if trip.stops == 0 {
                palette.green
            } else {
                palette.orange
            };
            Ok(format!(
                "Total Distance: {bold}{:.2} km{reset}\nEstimated Stops: {stops_color}{}{reset} {gray}(Assuming {}km range){reset}\n",
                trip.distance_km,
                trip.stops,
                trip.vehicle_range_km,
                bold = palette.white_bold,
                gray = palette.gray,
                reset = palette.reset,
            ))
        }
    }
}

/// Render a failed estimate.
pub fn render_failure(
    summary: &ErrorSummary,
    format: OutputFormat,
    palette: &ColorPalette,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ErrorEnvelope { error: summary }),
        OutputFormat::Text => Ok(format!(
            "{red}Error ({}):{reset} {}\n",
            summary.kind,
            summary.message,
            red = palette.red,
            reset = palette.reset,
        )),
    }
}

/// Footer line with elapsed time.
pub fn render_footer(elapsed: Duration, palette: &ColorPalette) -> String {
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    format!(
        "{gray}Completed in {}{reset}",
        time_str,
        gray = palette.gray,
        reset = palette.reset
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use evrange_lib::ErrorKind;

    fn trip(distance_km: f64, stops: u64) -> TripEstimate {
        TripEstimate {
            distance_km,
            stops,
            vehicle_range_km: 300.0,
        }
    }

    #[test]
    fn plain_text_matches_library_rendering() {
        let out = render_success(&trip(3944.0, 14), OutputFormat::Text, &ColorPalette::plain())
            .unwrap();
        assert_eq!(
            out,
            "Total Distance: 3944.00 km\nEstimated Stops: 14 (Assuming 300km range)\n"
        );
    }

    #[test]
    fn colored_text_highlights_stops() {
        let palette = ColorPalette::colored();
        let needs_stops = render_success(&trip(3944.0, 14), OutputFormat::Text, &palette).unwrap();
        assert!(needs_stops.contains(&format!("{}14{}", palette.orange, palette.reset)));

        let no_stops = render_success(&trip(0.0, 0), OutputFormat::Text, &palette).unwrap();
        assert!(no_stops.contains(&format!("{}0{}", palette.green, palette.reset)));
    }

    #[test]
    fn json_success_is_display_payload() {
        let out = render_success(&trip(300.0, 1), OutputFormat::Json, &ColorPalette::plain())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({"distanceKm": 300.0, "stops": 1}));
    }

    #[test]
    fn failure_renderings() {
        let summary = ErrorSummary {
            kind: ErrorKind::BackendUnavailable,
            message: "routing backend unavailable: request timed out".to_string(),
        };

        let text = render_failure(&summary, OutputFormat::Text, &ColorPalette::plain()).unwrap();
        assert_eq!(
            text,
            "Error (backend_unavailable): routing backend unavailable: request timed out\n"
        );

        let json = render_failure(&summary, OutputFormat::Json, &ColorPalette::plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"]["kind"], "backend_unavailable");
    }

    #[test]
    fn footer_formats_milliseconds_and_seconds() {
        let plain = ColorPalette::plain();
        assert_eq!(
            render_footer(Duration::from_millis(250), &plain),
            "Completed in 250ms"
        );
        assert_eq!(
            render_footer(Duration::from_millis(1500), &plain),
            "Completed in 1.50s"
        );
    }
}
