//! Timestamp parsing for input messages.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::DomainError;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 timestamp into UTC.
///
/// Offset-carrying RFC 3339 values are converted to UTC. Values without an
/// offset (`2024-01-01T00:00:00`, `2024-01-01 00:00:00.5`, `2024-01-01`) are
/// interpreted as UTC.
///
/// # Examples
///
/// ```
/// use moodsim_domain::common::parse_timestamp;
/// use chrono::Timelike;
///
/// let naive = parse_timestamp("2024-01-01T10:00:00").unwrap();
/// let zoned = parse_timestamp("2024-01-01T12:00:00+02:00").unwrap();
/// assert_eq!(naive, zoned);
/// assert_eq!(naive.hour(), 10);
/// ```
///
/// # Errors
///
/// Returns `DomainError::Parse` if none of the accepted forms match.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(DomainError::parse(format!(
        "Invalid ISO-8601 timestamp: '{}'",
        s
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_with_zulu() {
        let dt = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_with_offset_converts_to_utc() {
        let dt = parse_timestamp("2024-01-15T10:30:00+05:00").unwrap();
        assert_eq!(dt.hour(), 5);
    }

    #[test]
    fn test_parse_naive_forms() {
        let t = parse_timestamp("2024-01-01T00:00:00").unwrap();
        assert_eq!(t.hour(), 0);

        let spaced = parse_timestamp("2024-01-01 08:15:30.250").unwrap();
        assert_eq!(spaced.minute(), 15);
        assert_eq!(spaced.nanosecond(), 250_000_000);

        let date_only = parse_timestamp("2024-03-02").unwrap();
        assert_eq!(date_only.day(), 2);
        assert_eq!(date_only.hour(), 0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("not-a-date").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-01T00:00:00").is_err());
    }
}
