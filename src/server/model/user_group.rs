//! User group domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::user_group::{UserGroupDto, UserGroupPayloadDto},
    server::{error::validation::ValidationError, model::rest::WriteMode, util::validate::Validator},
};

/// A named group granting one role to its members.
#[derive(Debug, Clone, PartialEq)]
pub struct UserGroup {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserGroup {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::user_group::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            role: entity.role,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts domain model to DTO for API responses.
    pub fn into_dto(self) -> UserGroupDto {
        UserGroupDto {
            id: self.id,
            name: self.name,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields of a user group write request.
#[derive(Debug, Clone, Default)]
pub struct UserGroupParams {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl UserGroupParams {
    pub fn from_dto(dto: UserGroupPayloadDto) -> Self {
        Self {
            name: dto.name.map(|name| name.trim().to_string()),
            role: dto.role,
        }
    }

    /// Checks the rules that need no database access.
    ///
    /// # Arguments
    /// - `mode` - Whether missing fields are errors (`Create`, `Update`) or skipped (`Patch`)
    ///
    /// # Returns
    /// - `Ok(())` - Payload is acceptable
    /// - `Err(ValidationError)` - One entry per rejected field
    pub fn validate(&self, mode: WriteMode) -> Result<(), ValidationError> {
        let mut validator = Validator::new(mode);

        validator.required("name", &self.name);
        validator.length("name", self.name.as_deref(), 2, 255);
        validator.required("role", &self.role);

        validator.finish()
    }
}
