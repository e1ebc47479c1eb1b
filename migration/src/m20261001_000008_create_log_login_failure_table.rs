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
                    .table(LogLoginFailure::Table)
                    .if_not_exists()
                    .col(pk_uuid(LogLoginFailure::Id))
                    .col(uuid(LogLoginFailure::UserId))
                    .col(timestamp_with_time_zone(LogLoginFailure::Timestamp))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_login_failure_user_id")
                            .from(LogLoginFailure::Table, LogLoginFailure::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LogLoginFailure::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LogLoginFailure {
    Table,
    Id,
    UserId,
    Timestamp,
}
