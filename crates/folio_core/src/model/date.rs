//! Sortable timestamps for authored date strings.
//!
//! Accepted shapes, all read as UTC:
//! - RFC 3339 (`2025-11-29T08:30:00Z`)
//! - date-time without offset (`2025-11-29T08:30:00`, `2025-11-29T08:30`)
//! - `YYYY-MM-DD`
//! - `YYYY-MM` (first day of month)
//! - `YYYY` (January 1st)

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses `value` into epoch milliseconds.
///
/// Returns `None` when the string matches none of the accepted shapes.
pub fn sort_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.timestamp_millis());
    }

    if let Some(instant) = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(instant.and_utc().timestamp_millis());
    }

    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01-01"), "%Y-%m-%d"))
        .ok()?;

    day.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
}
