use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DateDimension::Table)
                    .if_not_exists()
                    .col(pk_uuid(DateDimension::Id))
                    .col(date(DateDimension::Date).unique_key())
                    .col(integer(DateDimension::Year))
                    .col(integer(DateDimension::Month))
                    .col(integer(DateDimension::Day))
                    .col(integer(DateDimension::Quarter))
                    .col(integer(DateDimension::WeekNumber))
                    .col(integer(DateDimension::DayNumberOfWeek))
                    .col(integer(DateDimension::DayOfYear))
                    .col(boolean(DateDimension::LeapYear))
                    .col(integer(DateDimension::WeekNumberingYear))
                    .col(big_integer(DateDimension::UnixTime))
                    .col(timestamp_with_time_zone(DateDimension::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DateDimension::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DateDimension {
    Table,
    Id,
    Date,
    Year,
    Month,
    Day,
    Quarter,
    WeekNumber,
    DayNumberOfWeek,
    DayOfYear,
    LeapYear,
    WeekNumberingYear,
    UnixTime,
    CreatedAt,
}
