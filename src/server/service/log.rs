use chrono::{TimeDelta, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        api_key::ApiKeyRepository, log_login::LogLoginRepository,
        log_request::LogRequestRepository, user::UserRepository,
    },
    error::AppError,
    model::log::{CleanupResult, RequestLogParams},
};

pub struct LogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a handled request.
    ///
    /// A `DELETE` may have removed the user or API key that made it, in which case the
    /// row is stored without that reference.
    pub async fn record_request(&self, mut params: RequestLogParams) -> Result<(), AppError> {
        if params.method == "DELETE" {
            if let Some(user_id) = params.user_id {
                if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
                    params.user_id = None;
                }
            }

            if let Some(api_key_id) = params.api_key_id {
                if ApiKeyRepository::new(self.db)
                    .find_by_id(api_key_id)
                    .await?
                    .is_none()
                {
                    params.api_key_id = None;
                }
            }
        }

        LogRequestRepository::new(self.db).create(params).await?;

        Ok(())
    }

    /// Deletes request and login log rows dated before today minus `retention_days`.
    ///
    /// # Arguments
    /// - `retention_days` - Days of history to keep, must not be negative
    ///
    /// # Returns
    /// - `Ok(CleanupResult)` - Number of removed rows per table
    /// - `Err(AppError::BadRequest)` - Negative retention, or one reaching before the
    ///   earliest representable date
    pub async fn cleanup(&self, retention_days: i64) -> Result<CleanupResult, AppError> {
        if retention_days < 0 {
            return Err(AppError::BadRequest(format!(
                "Retention must not be negative, got {}",
                retention_days
            )));
        }

        let cutoff = TimeDelta::try_days(retention_days)
            .and_then(|retention| Utc::now().date_naive().checked_sub_signed(retention))
            .ok_or_else(|| {
                AppError::BadRequest(format!("Retention of {} days is too large", retention_days))
            })?;

        let log_requests = LogRequestRepository::new(self.db)
            .delete_before(cutoff)
            .await?;
        let log_logins = LogLoginRepository::new(self.db)
            .delete_before(cutoff)
            .await?;

        tracing::info!(
            "Log cleanup removed {} request and {} login rows older than {}",
            log_requests,
            log_logins,
            cutoff
        );

        Ok(CleanupResult {
            log_requests,
            log_logins,
        })
    }
}
