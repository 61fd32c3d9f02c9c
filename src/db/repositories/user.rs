use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{prelude::*, users};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All user ids, ascending.
    pub async fn list_ids(&self) -> Result<Vec<i64>> {
        Users::find()
            .select_only()
            .column(users::Column::UserId)
            .order_by_asc(users::Column::UserId)
            .into_tuple::<i64>()
            .all(&self.conn)
            .await
            .context("Failed to query user IDs")
    }

    /// `None` if the user does not exist, `Some(None)` if it never logged in.
    pub async fn last_login(&self, user_id: i64) -> Result<Option<Option<String>>> {
        Users::find()
            .select_only()
            .column(users::Column::LastLogin)
            .filter(users::Column::UserId.eq(user_id))
            .into_tuple::<Option<String>>()
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    /// All `(user_id, last_login)` pairs, ascending by id.
    pub async fn list_with_login(&self) -> Result<Vec<(i64, Option<String>)>> {
        Users::find()
            .select_only()
            .column(users::Column::UserId)
            .column(users::Column::LastLogin)
            .order_by_asc(users::Column::UserId)
            .into_tuple::<(i64, Option<String>)>()
            .all(&self.conn)
            .await
            .context("Failed to query users with login data")
    }

    pub async fn insert(
        &self,
        user_id: i64,
        username: &str,
        last_login: Option<String>,
    ) -> Result<()> {
        users::ActiveModel {
            user_id: Set(user_id),
            username: Set(username.to_string()),
            last_login: Set(last_login),
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert user {user_id}"))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Users::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }
}
