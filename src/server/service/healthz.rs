use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{data::healthz::HealthzRepository, error::AppError};

/// Health check rows are kept for this many days.
pub const HEALTHZ_RETENTION_DAYS: i64 = 7;

pub struct HealthzService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HealthzService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Proves the database is writable by inserting a row, then prunes old rows.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - Timestamp of the inserted row
    /// - `Err(AppError::DbErr)` - Database is unreachable or read only
    pub async fn check(&self) -> Result<DateTime<Utc>, AppError> {
        let repo = HealthzRepository::new(self.db);

        let row = repo.create().await?;
        let removed = repo
            .delete_before(row.timestamp - Duration::days(HEALTHZ_RETENTION_DAYS))
            .await?;

        if removed > 0 {
            tracing::debug!("Removed {} old healthz rows", removed);
        }

        Ok(row.timestamp)
    }
}
