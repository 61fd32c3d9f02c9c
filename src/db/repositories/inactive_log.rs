use anyhow::{Context, Result};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::{InactiveLogEntry, NewInactiveLogEntry};
use crate::entities::{inactive_log, prelude::*};

pub struct InactiveLogRepository {
    conn: DatabaseConnection,
}

impl InactiveLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: inactive_log::Model) -> InactiveLogEntry {
        InactiveLogEntry {
            log_id: m.log_id,
            user_id: m.user_id,
            last_login: m.last_login,
            days_since_login: m.days_since_login,
            logged_at: m.logged_at,
        }
    }

    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        self.conn
            .begin()
            .await
            .context("Failed to begin inactive log transaction")
    }

    /// Inserts one row on `conn`, which is normally an open transaction.
    pub async fn insert<C: ConnectionTrait>(conn: &C, entry: &NewInactiveLogEntry) -> Result<()> {
        let active_model = inactive_log::ActiveModel {
            user_id: Set(entry.user_id.value()),
            last_login: Set(entry.last_login_text()),
            days_since_login: Set(entry.days_since_login),
            logged_at: Set(entry.logged_at_text()),
            ..Default::default()
        };

        InactiveLog::insert(active_model)
            .exec(conn)
            .await
            .with_context(|| format!("Failed to log inactive user {}", entry.user_id))?;
        Ok(())
    }

    /// Newest rows first.
    pub async fn recent(&self, limit: u64) -> Result<Vec<InactiveLogEntry>> {
        let rows = InactiveLog::find()
            .order_by_desc(inactive_log::Column::LogId)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query inactive log")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        InactiveLog::find()
            .count(&self.conn)
            .await
            .context("Failed to count inactive log rows")
    }
}
