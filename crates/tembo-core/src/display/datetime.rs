//! Backend timestamp parsing and formatting.
//!
//! The backend sends ISO 8601 strings, sometimes with an offset and
//! sometimes without. Offset-bearing values are read as UTC wall-clock time;
//! naive ones are taken as-is.

use std::fmt;

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Parse a backend timestamp into a civil date-time.
pub fn parse_backend_time(value: &str) -> Option<DateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp.to_zoned(TimeZone::UTC).datetime());
    }
    value.parse::<DateTime>().ok()
}

/// Formats a backend timestamp as `YYYY-MM-DD HH:MM`, or echoes the raw
/// text when it does not parse.
pub struct BackendTime<'a>(pub &'a str);

impl<'a> fmt::Display for BackendTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match parse_backend_time(self.0) {
            Some(datetime) => write!(f, "{}", datetime.strftime("%Y-%m-%d %H:%M")),
            None if self.0.trim().is_empty() => write!(f, "unknown"),
            None => write!(f, "{}", self.0),
        }
    }
}
