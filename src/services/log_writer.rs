use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::domain::{ClassifiedUser, NewInactiveLogEntry};
use crate::services::error::AnalyzerError;
use crate::services::store::ActivityStore;

/// Appends INACTIVE classifications to the inactive log in one transaction.
pub struct InactiveLogWriter {
    store: Arc<dyn ActivityStore>,
}

impl InactiveLogWriter {
    #[must_use]
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Logs every INACTIVE user in `classified` and returns how many rows were written.
    ///
    /// Rows are stamped with the time of the write. Either all rows commit or
    /// none do. With nothing to log, no transaction is opened.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Write`] after rolling back on any storage fault.
    pub async fn log_inactive(&self, classified: &[ClassifiedUser]) -> Result<usize, AnalyzerError> {
        let logged_at = Utc::now();
        let entries: Vec<NewInactiveLogEntry> = classified
            .iter()
            .filter(|user| user.is_inactive())
            .map(|user| NewInactiveLogEntry::from_classified(user, logged_at))
            .collect();

        if entries.is_empty() {
            debug!("No inactive users to log");
            return Ok(0);
        }

        let mut txn = self
            .store
            .begin()
            .await
            .map_err(|e| AnalyzerError::write("Failed to begin inactive log transaction", e))?;

        for entry in &entries {
            if let Err(e) = txn.insert(entry).await {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, "Rollback of inactive log batch failed");
                }
                return Err(AnalyzerError::write(
                    format!("Failed to log inactive user {}", entry.user_id),
                    e,
                ));
            }
        }

        txn.commit()
            .await
            .map_err(|e| AnalyzerError::write("Failed to commit inactive log batch", e))?;

        info!(count = entries.len(), "Logged inactive users");
        Ok(entries.len())
    }
}
