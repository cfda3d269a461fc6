use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::server::error::validation::ValidationError;

/// Current timestamp, truncated to what the database stores.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Parses a date or datetime string from the API.
///
/// Accepts RFC 3339 ("2025-09-15T10:30:00Z"), a bare datetime
/// ("2025-09-15T10:30:00"), or a bare date ("2025-09-15", midnight UTC).
pub fn parse_datetime(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        // Midnight is always valid for a parsed date
        return Ok(date.and_hms_opt(0, 0, 0).unwrap());
    }

    Err(ValidationError::Malformed {
        field,
        reason: format!("'{}' is not a valid date", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect bare dates to parse to midnight
    #[test]
    fn parses_bare_date() {
        let parsed = parse_datetime("dueDate", "2025-09-15").unwrap();

        assert_eq!(parsed.to_string(), "2025-09-15 00:00:00");
    }

    /// Expect RFC 3339 datetimes to parse and normalize to UTC
    #[test]
    fn parses_rfc3339() {
        let parsed = parse_datetime("dueDate", "2025-09-15T08:30:00+02:00").unwrap();

        assert_eq!(parsed.to_string(), "2025-09-15 06:30:00");
    }

    /// Expect a validation error naming the field for garbage input
    #[test]
    fn rejects_malformed_date() {
        let result = parse_datetime("targetDate", "not-a-date");

        let err = result.unwrap_err();
        assert_eq!(err.field(), "targetDate");
    }
}
