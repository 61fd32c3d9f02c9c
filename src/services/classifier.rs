//! Assigns activity tiers from login age.
//!
//! Thresholds are inclusive: up to 7 days is ACTIVE, 8 to 30 days is DORMANT,
//! anything older is INACTIVE. Users who never logged in are INACTIVE too.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::constants::thresholds::{ACTIVE_DAYS, DORMANT_DAYS};
use crate::constants::timestamps::SECONDS_PER_DAY;
use crate::domain::{ActivityCategory, ClassifiedUser, Timestamp, UserId, UserRecord};
use crate::services::error::AnalyzerError;

/// Whole days from `last_login` to `reference`, rounded toward negative infinity.
///
/// 7 days 23 hours yields 7; one hour in the future yields -1.
#[must_use]
pub fn days_since(last_login: &Timestamp, reference: DateTime<Utc>) -> i64 {
    let elapsed = reference - last_login.to_utc();
    elapsed.num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Tier for a login age in days. Negative ages (future-dated logins) are ACTIVE.
#[must_use]
pub const fn categorize(days_since_login: i64) -> ActivityCategory {
    if days_since_login <= ACTIVE_DAYS {
        ActivityCategory::Active
    } else if days_since_login <= DORMANT_DAYS {
        ActivityCategory::Dormant
    } else {
        ActivityCategory::Inactive
    }
}

/// Classifies one user against `reference`.
///
/// # Errors
///
/// Returns [`AnalyzerError::InvalidUserId`] if `user_id <= 0`.
pub fn classify_user(
    user_id: i64,
    last_login: Option<Timestamp>,
    reference: DateTime<Utc>,
) -> Result<ClassifiedUser, AnalyzerError> {
    let user_id = UserId::try_from(user_id)?;

    let Some(login) = last_login else {
        return Ok(ClassifiedUser {
            user_id,
            last_login: None,
            days_since_login: None,
            category: ActivityCategory::Inactive,
        });
    };

    let days = days_since(&login, reference);
    if days < 0 {
        warn!(%user_id, last_login = %login, "Last login is after the reference instant");
    }

    Ok(ClassifiedUser {
        user_id,
        last_login: Some(login),
        days_since_login: Some(days),
        category: categorize(days),
    })
}

/// Classifier bound to one reference instant for a whole run.
#[derive(Debug, Clone, Copy)]
pub struct UserClassifier {
    reference: DateTime<Utc>,
}

impl UserClassifier {
    #[must_use]
    pub const fn new(reference: DateTime<Utc>) -> Self {
        Self { reference }
    }

    #[must_use]
    pub const fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    pub fn classify(
        &self,
        user_id: i64,
        last_login: Option<Timestamp>,
    ) -> Result<ClassifiedUser, AnalyzerError> {
        classify_user(user_id, last_login, self.reference)
    }

    /// Classifies every record, preserving order.
    ///
    /// A single invalid id fails the whole batch and nothing is returned.
    pub fn classify_many(
        &self,
        records: &[UserRecord],
    ) -> Result<Vec<ClassifiedUser>, AnalyzerError> {
        let classified = records
            .iter()
            .map(|record| self.classify(record.user_id, record.last_login))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = classified.len(), "Classified users");
        Ok(classified)
    }
}
