use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::envelope::ValidationError;

/// Parse a timestamp that is either RFC 3339 (with offset) or a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` local-format value.
///
/// Naive values are interpreted as UTC; they are only ever used for
/// comparisons, the original string is what goes on the wire.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

/// Whether the input is a bare `YYYY-MM-DD` calendar date.
pub fn is_date_only(value: &str) -> bool {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    re.is_match(value)
}

/// Normalize a list-posts date range.
///
/// Date-only inputs expand to the full day (start-of-day and
/// end-of-day-with-milliseconds); anything else must parse as a timestamp
/// and passes through unchanged.
pub fn normalize_date_range(
    start_date: &str,
    end_date: &str,
) -> Result<(String, String), ValidationError> {
    let start = if is_date_only(start_date) {
        format!("{start_date}T00:00:00")
    } else if parse_datetime(start_date).is_none() {
        return Err(ValidationError::InvalidStartDate);
    } else {
        start_date.to_string()
    };

    let end = if is_date_only(end_date) {
        format!("{end_date}T23:59:59.999")
    } else if parse_datetime(end_date).is_none() {
        return Err(ValidationError::InvalidEndDate);
    } else {
        end_date.to_string()
    };

    Ok((start, end))
}
