use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_uuid(User::Id))
                    .col(string_uniq(User::Username))
                    .col(string(User::FirstName))
                    .col(string(User::LastName))
                    .col(string_uniq(User::Email))
                    .col(string(User::Password))
                    .col(string_len(User::Language, 2).default("en"))
                    .col(string_len(User::Locale, 2).default("en"))
                    .col(string(User::Timezone).default("Europe/Helsinki"))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Username,
    FirstName,
    LastName,
    Email,
    Password,
    Language,
    Locale,
    Timezone,
    CreatedAt,
    UpdatedAt,
}
