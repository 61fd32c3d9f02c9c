use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::domain::{InactiveLogEntry, NewInactiveLogEntry};

pub mod migrator;
pub mod repositories;

pub use repositories::inactive_log::InactiveLogRepository;
pub use repositories::user::UserRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1, Duration::from_secs(10)).await
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::with_pool_options(
            &config.general.database_path,
            config.database.max_connections,
            config.database.min_connections,
            Duration::from_secs(config.database.connect_timeout_secs),
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(connect_timeout)
            .acquire_timeout(connect_timeout)
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    fn inactive_log_repo(&self) -> InactiveLogRepository {
        InactiveLogRepository::new(self.conn.clone())
    }

    pub async fn list_user_ids(&self) -> Result<Vec<i64>> {
        self.user_repo().list_ids().await
    }

    pub async fn get_last_login(&self, user_id: i64) -> Result<Option<Option<String>>> {
        self.user_repo().last_login(user_id).await
    }

    pub async fn list_users_with_login(&self) -> Result<Vec<(i64, Option<String>)>> {
        self.user_repo().list_with_login().await
    }

    pub async fn add_user(
        &self,
        user_id: i64,
        username: &str,
        last_login: Option<String>,
    ) -> Result<()> {
        self.user_repo().insert(user_id, username, last_login).await
    }

    pub async fn user_count(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn begin_inactive_log(&self) -> Result<DatabaseTransaction> {
        self.inactive_log_repo().begin().await
    }

    pub async fn insert_inactive_log(
        txn: &DatabaseTransaction,
        entry: &NewInactiveLogEntry,
    ) -> Result<()> {
        InactiveLogRepository::insert(txn, entry).await
    }

    pub async fn recent_inactive_log(&self, limit: u64) -> Result<Vec<InactiveLogEntry>> {
        self.inactive_log_repo().recent(limit).await
    }

    pub async fn inactive_log_count(&self) -> Result<u64> {
        self.inactive_log_repo().count().await
    }
}
