use std::sync::Arc;

use tracing::debug;

use crate::domain::{Timestamp, UserRecord};
use crate::parser::TimestampParser;
use crate::services::error::AnalyzerError;
use crate::services::store::ActivityStore;

/// Loads user ids and login timestamps from an [`ActivityStore`].
pub struct ActivityLoader {
    store: Arc<dyn ActivityStore>,
}

impl ActivityLoader {
    #[must_use]
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    pub async fn load_user_ids(&self) -> Result<Vec<i64>, AnalyzerError> {
        self.store
            .user_ids()
            .await
            .map_err(|e| AnalyzerError::load("Failed to load user IDs", e))
    }

    /// Last login of a single user.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::UserNotFound`] for an unknown id. A known user
    /// who never logged in yields `Ok(None)`.
    pub async fn load_last_login(&self, user_id: i64) -> Result<Option<Timestamp>, AnalyzerError> {
        let row = self.store.last_login(user_id).await.map_err(|e| {
            AnalyzerError::load(format!("Failed to load last login for user {user_id}"), e)
        })?;

        let value = row.ok_or(AnalyzerError::UserNotFound(user_id))?;
        value.map(TimestampParser::resolve).transpose()
    }

    /// Every user with its parsed last login, ordered by id.
    ///
    /// Nothing is returned unless every row loads and parses.
    pub async fn load_all(&self) -> Result<Vec<UserRecord>, AnalyzerError> {
        let rows = self
            .store
            .users_with_login()
            .await
            .map_err(|e| AnalyzerError::load("Failed to load users with login data", e))?;

        let records = rows
            .into_iter()
            .map(|(user_id, value)| {
                let last_login = value.map(TimestampParser::resolve).transpose()?;
                Ok(UserRecord::new(user_id, last_login))
            })
            .collect::<Result<Vec<_>, AnalyzerError>>()?;

        debug!(count = records.len(), "Loaded users with login data");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoginValue;
    use crate::services::memory::MemoryActivityStore;
    use chrono::{TimeZone, Utc};

    fn loader(store: MemoryActivityStore) -> ActivityLoader {
        ActivityLoader::new(Arc::new(store))
    }

    #[tokio::test]
    async fn load_all_parses_text_and_passes_instants_through() {
        let instant = Timestamp::from(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        let store = MemoryActivityStore::new();
        store.add_user(3, Some(LoginValue::from("2024-01-01 10:00:00")));
        store.add_user(1, Some(LoginValue::Instant(instant)));
        store.add_user(2, None);

        let records = loader(store).load_all().await.unwrap();

        let ids: Vec<i64> = records.iter().map(|r| r.user_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[0].last_login, Some(instant));
        assert_eq!(records[1].last_login, None);
        assert_eq!(
            records[2].last_login.unwrap().to_utc(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn load_all_fails_on_unparseable_timestamp() {
        let store = MemoryActivityStore::new();
        store.add_user(1, Some(LoginValue::from("2024-01-01T00:00:00Z")));
        store.add_user(2, Some(LoginValue::from("yesterday")));

        let err = loader(store).load_all().await.unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidTimestamp(ref s) if s == "yesterday"));
    }

    #[tokio::test]
    async fn storage_faults_become_load_errors() {
        let store = MemoryActivityStore::new();
        store.add_user(1, None);
        store.fail_loads();
        let loader = loader(store);

        assert!(matches!(loader.load_all().await, Err(AnalyzerError::Load { .. })));
        assert!(matches!(loader.load_user_ids().await, Err(AnalyzerError::Load { .. })));
        assert!(matches!(loader.load_last_login(1).await, Err(AnalyzerError::Load { .. })));
    }

    #[tokio::test]
    async fn single_lookup_distinguishes_missing_from_never_logged_in() {
        let store = MemoryActivityStore::new();
        store.add_user(5, None);
        store.add_user(6, Some(LoginValue::from("2024-03-03T03:03:03Z")));
        let loader = loader(store);

        assert_eq!(loader.load_last_login(5).await.unwrap(), None);
        assert!(loader.load_last_login(6).await.unwrap().is_some());
        assert!(matches!(
            loader.load_last_login(7).await,
            Err(AnalyzerError::UserNotFound(7))
        ));
        assert_eq!(loader.load_user_ids().await.unwrap(), vec![5, 6]);
    }
}
