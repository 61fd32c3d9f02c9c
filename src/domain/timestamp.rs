use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// A login instant as it was recorded.
///
/// Values without zone information stay naive until they are compared
/// against a reference instant, at which point they are read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// Normalizes to UTC. Naive values are taken as already being UTC.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Zoned(dt) => dt.with_timezone(&Utc),
            Self::Naive(naive) => naive.and_utc(),
        }
    }

    #[must_use]
    pub const fn is_naive(&self) -> bool {
        matches!(self, Self::Naive(_))
    }

    /// ISO-8601 rendering, e.g. `2024-03-01T08:30:00+00:00` or
    /// `2024-03-01T08:30:00` for naive values. Fractional seconds are only
    /// written when present.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        match self {
            Self::Zoned(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            Self::Naive(naive) => naive.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Zoned(dt.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Zoned(dt)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Naive(naive)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_iso_string())
    }
}

/// A `last_login` column value before parsing.
///
/// Text columns need parsing; typed columns already carry an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValue {
    Text(String),
    Instant(Timestamp),
}

impl From<&str> for LoginValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LoginValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Timestamp> for LoginValue {
    fn from(ts: Timestamp) -> Self {
        Self::Instant(ts)
    }
}
