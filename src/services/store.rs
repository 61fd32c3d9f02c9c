//! Narrow storage interface consumed by the analysis pipeline.
//!
//! The pipeline needs exactly three reads and one transactional append, so a
//! backend only has to provide those. [`crate::services::SeaOrmActivityStore`]
//! talks to SQLite, [`crate::services::MemoryActivityStore`] keeps everything
//! in process for tests.

use crate::domain::{LoginValue, NewInactiveLogEntry};
use crate::services::error::StoreError;

/// Read access to users plus transactional append access to the inactive log.
#[async_trait::async_trait]
pub trait ActivityStore: Send + Sync {
    /// All user ids, ascending.
    async fn user_ids(&self) -> Result<Vec<i64>, StoreError>;

    /// The raw `last_login` of one user.
    ///
    /// `Ok(None)` means the user does not exist, `Ok(Some(None))` means the
    /// user exists but never logged in.
    async fn last_login(&self, user_id: i64) -> Result<Option<Option<LoginValue>>, StoreError>;

    /// All `(user_id, last_login)` pairs, ascending by id.
    async fn users_with_login(&self) -> Result<Vec<(i64, Option<LoginValue>)>, StoreError>;

    /// Opens a transaction on the inactive log.
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, StoreError>;
}

/// An open unit of work on the inactive log.
///
/// Rows inserted through it become visible only on [`LogTransaction::commit`].
/// Dropping it without committing discards them.
#[async_trait::async_trait]
pub trait LogTransaction: Send {
    async fn insert(&mut self, entry: &NewInactiveLogEntry) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
