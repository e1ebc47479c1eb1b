//! API key domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::api_key::{ApiKeyDto, ApiKeyPayloadDto},
    server::{
        error::validation::ValidationError,
        model::{rest::WriteMode, user_group::UserGroup},
        util::validate::Validator,
    },
};

pub const API_KEY_TOKEN_LENGTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiKey {
    pub id: Uuid,
    pub token: String,
    pub description: String,
    pub user_groups: Vec<UserGroup>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApiKey {
    /// Converts entity models to a domain model at the repository boundary.
    pub fn from_entity(
        entity: entity::api_key::Model,
        groups: Vec<entity::user_group::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            token: entity.token,
            description: entity.description,
            user_groups: groups.into_iter().map(UserGroup::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts domain model to DTO for API responses.
    pub fn into_dto(self) -> ApiKeyDto {
        ApiKeyDto {
            id: self.id,
            token: self.token,
            description: self.description,
            user_groups: self
                .user_groups
                .into_iter()
                .map(UserGroup::into_dto)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiKeyParams {
    pub description: Option<String>,
    pub user_groups: Option<Vec<Uuid>>,
}

impl ApiKeyParams {
    pub fn from_dto(dto: ApiKeyPayloadDto) -> Self {
        Self {
            description: dto.description,
            user_groups: dto.user_groups,
        }
    }

    /// Checks the rules that need no database access.
    pub fn validate(&self, mode: WriteMode) -> Result<(), ValidationError> {
        let mut validator = Validator::new(mode);

        validator.required("description", &self.description);

        validator.finish()
    }
}
