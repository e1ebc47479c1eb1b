use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::date_dimension::DateDimensionRepository, error::AppError,
    model::date_dimension::DateDimension,
};

pub struct DateDimensionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DateDimensionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fills the date dimension with one row per day from Jan 1st of `from_year`
    /// to Dec 31st of `to_year`. Days that already exist are skipped.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of inserted days
    /// - `Err(AppError::BadRequest)` - `from_year` after `to_year` or a year outside the calendar
    pub async fn generate(&self, from_year: i32, to_year: i32) -> Result<u64, AppError> {
        if from_year > to_year {
            return Err(AppError::BadRequest(format!(
                "Start year {} is after end year {}",
                from_year, to_year
            )));
        }

        let (Some(from), Some(to)) = (
            NaiveDate::from_ymd_opt(from_year, 1, 1),
            NaiveDate::from_ymd_opt(to_year, 12, 31),
        ) else {
            return Err(AppError::BadRequest(format!(
                "Year range {}-{} is not supported",
                from_year, to_year
            )));
        };

        let repo = DateDimensionRepository::new(self.db);
        let existing = repo.existing_dates(from, to).await?;

        let days: Vec<DateDimension> = from
            .iter_days()
            .take_while(|date| *date <= to)
            .filter(|date| !existing.contains(date))
            .map(DateDimension::from_date)
            .collect();

        let inserted = repo.create_many(days).await?;

        tracing::info!(
            "Date dimension {}..{}: inserted {} days, {} already present",
            from,
            to,
            inserted,
            existing.len()
        );

        Ok(inserted)
    }
}
