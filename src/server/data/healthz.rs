use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

pub struct HealthzRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HealthzRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self) -> Result<entity::healthz::Model, DbErr> {
        entity::healthz::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            timestamp: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Deletes health check rows older than `cutoff`.
    pub async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Healthz::delete_many()
            .filter(entity::healthz::Column::Timestamp.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
