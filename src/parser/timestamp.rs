use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::constants::timestamps::FALLBACK_FORMAT;
use crate::domain::{LoginValue, Timestamp};
use crate::services::error::AnalyzerError;

const ISO_ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const ISO_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses textual login timestamps.
///
/// ISO-8601 is tried first (a trailing `Z` means UTC), then the
/// `YYYY-MM-DD HH:MM:SS` fallback. Naive results stay naive.
pub struct TimestampParser;

impl TimestampParser {
    pub fn parse(timestamp_str: &str) -> Result<Timestamp, AnalyzerError> {
        let trimmed = timestamp_str.trim();

        if let Some(ts) = Self::parse_iso(trimmed) {
            return Ok(ts);
        }

        NaiveDateTime::parse_from_str(trimmed, FALLBACK_FORMAT)
            .map(Timestamp::Naive)
            .map_err(|_| AnalyzerError::InvalidTimestamp(timestamp_str.to_string()))
    }

    /// Resolves a raw column value. Instants pass through unchanged.
    pub fn resolve(value: LoginValue) -> Result<Timestamp, AnalyzerError> {
        match value {
            LoginValue::Text(text) => Self::parse(&text),
            LoginValue::Instant(ts) => Ok(ts),
        }
    }

    fn parse_iso(s: &str) -> Option<Timestamp> {
        let normalized = match s.strip_suffix('Z') {
            Some(rest) => format!("{rest}+00:00"),
            None => s.to_string(),
        };

        for fmt in ISO_ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
                return Some(Timestamp::Zoned(dt));
            }
        }

        for fmt in ISO_NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
                return Some(Timestamp::Naive(naive));
            }
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Timestamp::Naive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_z_suffix() {
        let ts = TimestampParser::parse("2024-01-01T12:00:00Z").unwrap();
        assert!(!ts.is_naive());
        assert_eq!(ts.to_utc(), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_offset() {
        let ts = TimestampParser::parse("2024-01-01T12:00:00.250+05:30").unwrap();
        assert_eq!(
            ts.to_utc().timestamp_millis(),
            Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap().timestamp_millis() + 250
        );
    }

    #[test]
    fn test_parse_naive_iso() {
        let ts = TimestampParser::parse("2024-01-01T12:00:00").unwrap();
        assert!(ts.is_naive());
        assert_eq!(ts.to_utc(), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_fallback_pattern() {
        let ts = TimestampParser::parse("2023-06-15 08:30:45").unwrap();
        assert!(ts.is_naive());
        assert_eq!(ts.to_utc(), Utc.with_ymd_and_hms(2023, 6, 15, 8, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_date_only() {
        let ts = TimestampParser::parse("2023-06-15").unwrap();
        assert_eq!(ts.to_utc(), Utc.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["invalid", "", "2024-13-01T00:00:00", "15/06/2023 08:30", "2024-01-01T25:00:00Z"] {
            let err = TimestampParser::parse(bad).unwrap_err();
            assert!(matches!(err, AnalyzerError::InvalidTimestamp(_)), "{bad}");
        }
    }

    #[test]
    fn test_iso_rendering_parses_back_to_same_second() {
        let original = Utc.with_ymd_and_hms(2022, 11, 3, 17, 45, 9).unwrap();
        let rendered = Timestamp::from(original).to_iso_string();

        let parsed = TimestampParser::parse(&rendered).unwrap();
        assert_eq!(parsed.to_utc().timestamp(), original.timestamp());

        let fallback = original.format("%Y-%m-%d %H:%M:%S").to_string();
        let parsed = TimestampParser::parse(&fallback).unwrap();
        assert_eq!(parsed.to_utc().timestamp(), original.timestamp());
    }

    #[test]
    fn test_resolve_passes_instants_through() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(TimestampParser::resolve(LoginValue::Instant(ts)).unwrap(), ts);
        assert_eq!(
            TimestampParser::resolve(LoginValue::from("2020-02-29T00:00:00+00:00")).unwrap(),
            ts
        );
    }
}
