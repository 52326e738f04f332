//! Daily forecast summaries and the aggregation over raw forecast samples

use super::ForecastPoint;
use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One calendar day of forecast, in the location's timezone
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailySummary {
    /// Calendar date at the location, not at the server or in UTC
    pub local_date: NaiveDate,
    /// Minimum temperature across the day's samples, Celsius
    pub min_temp_c: f64,
    /// Maximum temperature across the day's samples, Celsius
    pub max_temp_c: f64,
    /// Text of the condition code occurring most often in the day
    pub dominant_condition: String,
    /// Worst-case precipitation probability across the day (0.0 - 1.0)
    pub precipitation_chance: f64,
}

/// Collapse a raw forecast series into per-day summaries.
///
/// Samples are bucketed by the calendar date their timestamp falls on in the
/// location's timezone (`utc_offset_seconds`). Buckets keep the first-seen
/// order of distinct dates, and the result is truncated to the first
/// `horizon_days` of them; a series covering fewer days yields fewer
/// summaries. An empty series yields an empty result.
#[must_use]
pub fn aggregate_daily(
    points: &[ForecastPoint],
    utc_offset_seconds: i32,
    horizon_days: u32,
) -> Vec<DailySummary> {
    // Offsets beyond +/-24h cannot come out of a timezone database; treat
    // them as UTC rather than dropping the whole series.
    let offset = FixedOffset::east_opt(utc_offset_seconds)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());

    let mut days: Vec<(NaiveDate, Vec<&ForecastPoint>)> = Vec::new();
    for point in points {
        let local_date = point.timestamp.with_timezone(&offset).date_naive();
        match days.iter_mut().find(|(date, _)| *date == local_date) {
            Some((_, group)) => group.push(point),
            None => days.push((local_date, vec![point])),
        }
    }

    days.truncate(horizon_days as usize);
    days.into_iter()
        .map(|(date, group)| summarize_day(date, &group))
        .collect()
}

fn summarize_day(local_date: NaiveDate, group: &[&ForecastPoint]) -> DailySummary {
    let mut min_temp_c = f64::INFINITY;
    let mut max_temp_c = f64::NEG_INFINITY;
    let mut precipitation_chance: f64 = 0.0;

    // (code, occurrences, text of the code's first occurrence)
    let mut conditions: Vec<(u16, usize, &str)> = Vec::new();

    for point in group {
        min_temp_c = min_temp_c.min(point.temperature_c);
        max_temp_c = max_temp_c.max(point.temperature_c);
        precipitation_chance = precipitation_chance.max(point.precipitation_probability);

        match conditions
            .iter_mut()
            .find(|(code, _, _)| *code == point.condition_code)
        {
            Some((_, count, _)) => *count += 1,
            None => conditions.push((point.condition_code, 1, point.condition.as_str())),
        }
    }

    // Most frequent condition code wins; ties go to the code seen earliest.
    let mut dominant = &conditions[0];
    for candidate in &conditions[1..] {
        if candidate.1 > dominant.1 {
            dominant = candidate;
        }
    }

    DailySummary {
        local_date,
        min_temp_c,
        max_temp_c,
        dominant_condition: dominant.2.to_string(),
        precipitation_chance,
    }
}
