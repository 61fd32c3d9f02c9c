//! `SeaORM` implementation of the [`ActivityStore`] trait.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use crate::db::Store;
use crate::domain::{LoginValue, NewInactiveLogEntry};
use crate::services::error::StoreError;
use crate::services::store::{ActivityStore, LogTransaction};

/// SQLite-backed store. The `last_login` column is TEXT, so every value
/// surfaces as [`LoginValue::Text`].
pub struct SeaOrmActivityStore {
    store: Store,
}

impl SeaOrmActivityStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActivityStore for SeaOrmActivityStore {
    async fn user_ids(&self) -> Result<Vec<i64>, StoreError> {
        Ok(self.store.list_user_ids().await?)
    }

    async fn last_login(&self, user_id: i64) -> Result<Option<Option<LoginValue>>, StoreError> {
        let row = self.store.get_last_login(user_id).await?;
        Ok(row.map(|login| login.map(LoginValue::Text)))
    }

    async fn users_with_login(&self) -> Result<Vec<(i64, Option<LoginValue>)>, StoreError> {
        let rows = self.store.list_users_with_login().await?;
        Ok(rows
            .into_iter()
            .map(|(id, login)| (id, login.map(LoginValue::Text)))
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn LogTransaction>, StoreError> {
        let txn = self.store.begin_inactive_log().await?;
        Ok(Box::new(SeaOrmLogTransaction { txn }))
    }
}

struct SeaOrmLogTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl LogTransaction for SeaOrmLogTransaction {
    async fn insert(&mut self, entry: &NewInactiveLogEntry) -> Result<(), StoreError> {
        Ok(Store::insert_inactive_log(&self.txn, entry).await?)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        Ok(self.txn.commit().await?)
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(self.txn.rollback().await?)
    }
}
