use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InactiveLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InactiveLog::LogId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InactiveLog::UserId).big_integer().not_null())
                    .col(ColumnDef::new(InactiveLog::LastLogin).string().null())
                    .col(ColumnDef::new(InactiveLog::DaysSinceLogin).big_integer().null())
                    .col(ColumnDef::new(InactiveLog::LoggedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inactive_log_user_id")
                            .from(InactiveLog::Table, InactiveLog::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inactive_log_user_id")
                    .table(InactiveLog::Table)
                    .col(InactiveLog::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InactiveLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InactiveLog {
    Table,
    LogId,
    UserId,
    LastLogin,
    DaysSinceLogin,
    LoggedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    UserId,
}
