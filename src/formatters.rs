//! Human-readable reply rendering
//!
//! Fixed layouts with a deterministic field order, so downstream consumers
//! that parse the text keep working. Missing optional fields render as
//! "N/A"; lines are never dropped.

use crate::models::{DailySummary, GeoLocation, Observation};
use chrono::FixedOffset;

const PLACEHOLDER: &str = "N/A";

/// Render current conditions for a location
pub fn format_current(location: &GeoLocation, observation: &Observation) -> String {
    let mut output = format!("Current weather for {}:\n", location.display_name());

    output.push_str(&format!(
        "  Temperature: {:.1}°C (feels like {:.1}°C)\n",
        observation.temperature_c, observation.feels_like_c
    ));
    output.push_str(&format!("  Condition: {}\n", observation.condition));
    output.push_str(&format!(
        "  Humidity: {}\n",
        observation
            .humidity_pct
            .map_or_else(|| PLACEHOLDER.to_string(), |h| format!("{h}%"))
    ));
    output.push_str(&format!(
        "  Wind: {}\n",
        observation
            .wind_speed_mps
            .map_or_else(|| PLACEHOLDER.to_string(), |w| format!("{w:.1} m/s"))
    ));
    output.push_str(&format!(
        "  Pressure: {}\n",
        observation
            .pressure_hpa
            .map_or_else(|| PLACEHOLDER.to_string(), |p| format!("{p} hPa"))
    ));
    output.push_str(&format!(
        "  Observed at: {} (local time)",
        format_local_time(observation, location.utc_offset_seconds)
    ));

    output
}

/// Render one line per forecast day for a location
pub fn format_forecast(location: &GeoLocation, days: &[DailySummary]) -> String {
    if days.is_empty() {
        return format!(
            "No forecast data available for {}.",
            location.display_name()
        );
    }

    let mut output = format!(
        "{}-day forecast for {}:\n",
        days.len(),
        location.display_name()
    );

    for day in days {
        output.push_str(&format!(
            "  {} {}: {:.1}°C to {:.1}°C, {}, {:.0}% chance of precipitation\n",
            day.local_date.format("%A"),
            day.local_date.format("%Y-%m-%d"),
            day.min_temp_c,
            day.max_temp_c,
            day.dominant_condition,
            day.precipitation_chance * 100.0
        ));
    }

    output.trim_end().to_string()
}

/// The observation timestamp in the location's timezone, not the server's
fn format_local_time(observation: &Observation, utc_offset_seconds: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_seconds)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
    observation
        .timestamp
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
