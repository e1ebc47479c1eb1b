use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use std::collections::HashSet;
use uuid::Uuid;

use crate::server::model::date_dimension::DateDimension;

/// Rows per INSERT statement, keeps bind parameters below driver limits.
const INSERT_BATCH_SIZE: usize = 100;

pub struct DateDimensionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DateDimensionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Dates within `from..=to` that already have a row.
    pub async fn existing_dates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HashSet<NaiveDate>, DbErr> {
        let dates = entity::prelude::DateDimension::find()
            .select_only()
            .column(entity::date_dimension::Column::Date)
            .filter(entity::date_dimension::Column::Date.between(from, to))
            .into_tuple::<NaiveDate>()
            .all(self.db)
            .await?;

        Ok(dates.into_iter().collect())
    }

    /// Inserts the given days in batches. Returns the number of inserted rows.
    pub async fn create_many(&self, days: Vec<DateDimension>) -> Result<u64, DbErr> {
        let mut inserted = 0;

        for batch in days.chunks(INSERT_BATCH_SIZE) {
            let models = batch.iter().map(|day| entity::date_dimension::ActiveModel {
                id: ActiveValue::Set(Uuid::now_v7()),
                date: ActiveValue::Set(day.date),
                year: ActiveValue::Set(day.year),
                month: ActiveValue::Set(day.month),
                day: ActiveValue::Set(day.day),
                quarter: ActiveValue::Set(day.quarter),
                week_number: ActiveValue::Set(day.week_number),
                day_number_of_week: ActiveValue::Set(day.day_number_of_week),
                day_of_year: ActiveValue::Set(day.day_of_year),
                leap_year: ActiveValue::Set(day.leap_year),
                week_numbering_year: ActiveValue::Set(day.week_numbering_year),
                unix_time: ActiveValue::Set(day.unix_time),
                created_at: ActiveValue::Set(Utc::now()),
            });

            entity::prelude::DateDimension::insert_many(models)
                .exec(self.db)
                .await?;

            inserted += batch.len() as u64;
        }

        Ok(inserted)
    }
}
