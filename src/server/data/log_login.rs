use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::log::LoginAttempt;

pub struct LogLoginRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LogLoginRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes one `log_login` row stamped with the current time.
    pub async fn create(&self, attempt: LoginAttempt) -> Result<entity::log_login::Model, DbErr> {
        let now = Utc::now();

        entity::log_login::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            login_type: ActiveValue::Set(attempt.login_type.as_str().to_string()),
            username: ActiveValue::Set(attempt.username),
            user_id: ActiveValue::Set(attempt.user_id),
            client_ip: ActiveValue::Set(attempt.client.ip),
            agent: ActiveValue::Set(attempt.client.agent),
            http_host: ActiveValue::Set(attempt.client.host),
            time: ActiveValue::Set(now),
            date: ActiveValue::Set(now.date_naive()),
        }
        .insert(self.db)
        .await
    }

    /// Records a failed login for the user's lock counter.
    pub async fn create_failure(
        &self,
        user_id: Uuid,
    ) -> Result<entity::log_login_failure::Model, DbErr> {
        entity::log_login_failure::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            user_id: ActiveValue::Set(user_id),
            timestamp: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    pub async fn count_failures(&self, user_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::LogLoginFailure::find()
            .filter(entity::log_login_failure::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Resets the user's lock counter. Returns the number of removed failures.
    pub async fn clear_failures(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let result = entity::prelude::LogLoginFailure::delete_many()
            .filter(entity::log_login_failure::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes login log rows dated before `date`.
    pub async fn delete_before(&self, date: NaiveDate) -> Result<u64, DbErr> {
        let result = entity::prelude::LogLogin::delete_many()
            .filter(entity::log_login::Column::Date.lt(date))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
