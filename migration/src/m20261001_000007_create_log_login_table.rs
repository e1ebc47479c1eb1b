use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000003_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LogLogin::Table)
                    .if_not_exists()
                    .col(pk_uuid(LogLogin::Id))
                    .col(string_len(LogLogin::Type, 20))
                    .col(string(LogLogin::Username))
                    .col(uuid_null(LogLogin::UserId))
                    .col(string_null(LogLogin::ClientIp))
                    .col(text_null(LogLogin::Agent))
                    .col(string_null(LogLogin::HttpHost))
                    .col(timestamp_with_time_zone(LogLogin::Time))
                    .col(date(LogLogin::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_login_user_id")
                            .from(LogLogin::Table, LogLogin::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_log_login_date")
                    .table(LogLogin::Table)
                    .col(LogLogin::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LogLogin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LogLogin {
    Table,
    Id,
    Type,
    Username,
    UserId,
    ClientIp,
    Agent,
    HttpHost,
    Time,
    Date,
}
