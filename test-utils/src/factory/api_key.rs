//! API key factory for creating test API key entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating test API keys with customizable fields.
pub struct ApiKeyFactory<'a> {
    db: &'a DatabaseConnection,
    token: String,
    description: String,
}

impl<'a> ApiKeyFactory<'a> {
    /// Creates a new ApiKeyFactory with default values.
    ///
    /// Defaults:
    /// - token: 40 characters, unique per call
    /// - description: `"Api key {id}"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            token: format!("{:0>40}", id),
            description: format!("Api key {}", id),
        }
    }

    /// Sets the token for the API key.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the description for the API key.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builds and inserts the API key entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::api_key::Model)` - Created API key entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::api_key::Model, DbErr> {
        entity::api_key::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            token: ActiveValue::Set(self.token),
            description: ActiveValue::Set(self.description),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an API key with default values.
pub async fn create_api_key(db: &DatabaseConnection) -> Result<entity::api_key::Model, DbErr> {
    ApiKeyFactory::new(db).build().await
}

/// Adds an API key to a user group.
pub async fn add_api_key_to_group(
    db: &DatabaseConnection,
    api_key_id: Uuid,
    user_group_id: Uuid,
) -> Result<entity::api_key_has_user_group::Model, DbErr> {
    entity::api_key_has_user_group::ActiveModel {
        api_key_id: ActiveValue::Set(api_key_id),
        user_group_id: ActiveValue::Set(user_group_id),
    }
    .insert(db)
    .await
}
