use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

use crate::server::model::log::RequestLogParams;

pub struct LogRequestRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LogRequestRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes one `log_request` row stamped with the current time.
    pub async fn create(
        &self,
        params: RequestLogParams,
    ) -> Result<entity::log_request::Model, DbErr> {
        let now = Utc::now();

        entity::log_request::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            user_id: ActiveValue::Set(params.user_id),
            api_key_id: ActiveValue::Set(params.api_key_id),
            client_ip: ActiveValue::Set(params.client_ip),
            method: ActiveValue::Set(params.method),
            scheme: ActiveValue::Set(params.scheme),
            http_host: ActiveValue::Set(params.http_host),
            path: ActiveValue::Set(params.path),
            query_string: ActiveValue::Set(params.query_string),
            uri: ActiveValue::Set(params.uri),
            headers: ActiveValue::Set(params.headers),
            content: ActiveValue::Set(params.content),
            status_code: ActiveValue::Set(params.status_code),
            response_content_length: ActiveValue::Set(params.response_content_length),
            time: ActiveValue::Set(now),
            date: ActiveValue::Set(now.date_naive()),
        }
        .insert(self.db)
        .await
    }

    /// Deletes request log rows dated before `date`.
    pub async fn delete_before(&self, date: NaiveDate) -> Result<u64, DbErr> {
        let result = entity::prelude::LogRequest::delete_many()
            .filter(entity::log_request::Column::Date.lt(date))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
