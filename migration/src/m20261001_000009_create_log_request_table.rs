use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000003_create_user_table::User, m20261001_000005_create_api_key_table::ApiKey,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LogRequest::Table)
                    .if_not_exists()
                    .col(pk_uuid(LogRequest::Id))
                    .col(uuid_null(LogRequest::UserId))
                    .col(uuid_null(LogRequest::ApiKeyId))
                    .col(string_null(LogRequest::ClientIp))
                    .col(string_len(LogRequest::Method, 10))
                    .col(string_len(LogRequest::Scheme, 5))
                    .col(string(LogRequest::HttpHost))
                    .col(text(LogRequest::Path))
                    .col(text_null(LogRequest::QueryString))
                    .col(text(LogRequest::Uri))
                    .col(text(LogRequest::Headers))
                    .col(text(LogRequest::Content))
                    .col(integer(LogRequest::StatusCode))
                    .col(big_integer(LogRequest::ResponseContentLength))
                    .col(timestamp_with_time_zone(LogRequest::Time))
                    .col(date(LogRequest::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_request_user_id")
                            .from(LogRequest::Table, LogRequest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_request_api_key_id")
                            .from(LogRequest::Table, LogRequest::ApiKeyId)
                            .to(ApiKey::Table, ApiKey::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_log_request_date")
                    .table(LogRequest::Table)
                    .col(LogRequest::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LogRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LogRequest {
    Table,
    Id,
    UserId,
    ApiKeyId,
    ClientIp,
    Method,
    Scheme,
    HttpHost,
    Path,
    QueryString,
    Uri,
    Headers,
    Content,
    StatusCode,
    ResponseContentLength,
    Time,
    Date,
}
