use sea_orm::entity::prelude::*;

/// Calendar attributes for a single day, used for reporting joins.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "date_dimension")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub date: Date,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub quarter: i32,
    pub week_number: i32,
    /// ISO-8601 day of week, 1 (Monday) to 7 (Sunday)
    pub day_number_of_week: i32,
    pub day_of_year: i32,
    pub leap_year: bool,
    pub week_numbering_year: i32,
    pub unix_time: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
