use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Healthz::Table)
                    .if_not_exists()
                    .col(pk_uuid(Healthz::Id))
                    .col(timestamp_with_time_zone(Healthz::Timestamp))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Healthz::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Healthz {
    Table,
    Id,
    Timestamp,
}
