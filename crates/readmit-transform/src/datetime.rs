//! Admission timestamp parsing.
//!
//! The admissions table stores every timestamp in one fixed layout
//! (`YYYY-MM-DD HH:MM:SS` by default). Anything that does not match the
//! layout exactly is treated as missing rather than as an error.

use chrono::{NaiveDateTime, TimeDelta};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Parse a timestamp cell with the configured `chrono` format.
///
/// Returns `None` for empty cells and for values that do not match.
///
/// # Examples
///
/// ```
/// use readmit_transform::datetime::parse_timestamp;
///
/// let parsed = parse_timestamp(Some("2100-01-05 12:30:00"), "%Y-%m-%d %H:%M:%S");
/// assert!(parsed.is_some());
/// assert_eq!(parse_timestamp(Some("2100-01-05"), "%Y-%m-%d %H:%M:%S"), None);
/// assert_eq!(parse_timestamp(None, "%Y-%m-%d %H:%M:%S"), None);
/// ```
pub fn parse_timestamp(value: Option<&str>, format: &str) -> Option<NaiveDateTime> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, format).ok()
}

/// Format a timestamp with the configured `chrono` format.
pub fn format_timestamp(value: NaiveDateTime, format: &str) -> String {
    value.format(format).to_string()
}

/// Elapsed days from `from` to `to` as a fraction.
///
/// Negative when `to` is earlier than `from`.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta: TimeDelta = to - from;
    delta.num_milliseconds() as f64 / MILLIS_PER_DAY
}
