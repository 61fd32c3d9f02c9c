//! Domain types for activity classification with strong typing.
//!
//! Raw storage values enter as [`UserRecord`]s and leave as [`ClassifiedUser`]s.
//! The category is a closed enumeration so that no fourth tier can creep in.

pub mod timestamp;

pub use timestamp::{LoginValue, Timestamp};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::services::error::AnalyzerError;

/// Validated identifier of a user account.
///
/// Only strictly positive values can be constructed.
///
/// # Examples
///
/// ```rust
/// use activity_analyzer::domain::UserId;
///
/// let id = UserId::try_from(42).unwrap();
/// assert_eq!(id.value(), 42);
/// assert!(UserId::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Returns the underlying i64 value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = AnalyzerError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(AnalyzerError::InvalidUserId(raw))
        }
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

/// Activity tier assigned from the age of the last login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityCategory {
    Active,
    Dormant,
    Inactive,
}

impl ActivityCategory {
    pub const ALL: [Self; 3] = [Self::Active, Self::Dormant, Self::Inactive];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Dormant => "DORMANT",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "DORMANT" => Ok(Self::Dormant),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(format!("Unknown activity category: {other}")),
        }
    }
}

/// A `(user_id, last_login)` pair as loaded from storage.
///
/// The id is not validated yet; classification rejects non-positive values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: i64,
    pub last_login: Option<Timestamp>,
}

impl UserRecord {
    #[must_use]
    pub const fn new(user_id: i64, last_login: Option<Timestamp>) -> Self {
        Self {
            user_id,
            last_login,
        }
    }
}

/// Result of classifying one [`UserRecord`] against a reference instant.
///
/// `days_since_login` is `None` exactly when `last_login` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedUser {
    pub user_id: UserId,
    pub last_login: Option<Timestamp>,
    pub days_since_login: Option<i64>,
    pub category: ActivityCategory,
}

impl ClassifiedUser {
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.category == ActivityCategory::Inactive
    }
}

/// Row to be appended to the inactive log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInactiveLogEntry {
    pub user_id: UserId,
    pub last_login: Option<Timestamp>,
    pub days_since_login: Option<i64>,
    pub logged_at: DateTime<Utc>,
}

impl NewInactiveLogEntry {
    #[must_use]
    pub fn from_classified(user: &ClassifiedUser, logged_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.user_id,
            last_login: user.last_login,
            days_since_login: user.days_since_login,
            logged_at,
        }
    }

    /// Text stored in the `last_login` column of the log.
    #[must_use]
    pub fn last_login_text(&self) -> Option<String> {
        self.last_login.as_ref().map(Timestamp::to_iso_string)
    }

    /// Text stored in the `logged_at` column of the log.
    #[must_use]
    pub fn logged_at_text(&self) -> String {
        self.logged_at.to_rfc3339()
    }
}

/// Persisted inactive log row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveLogEntry {
    pub log_id: i64,
    pub user_id: i64,
    pub last_login: Option<String>,
    pub days_since_login: Option<i64>,
    pub logged_at: String,
}
