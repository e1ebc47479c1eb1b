use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::user_group::UserGroupDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub language: String,
    pub locale: String,
    pub timezone: String,
    pub user_groups: Vec<UserGroupDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating, replacing or patching a user.
///
/// `POST` requires `username`, `first_name`, `last_name`, `email` and `password`.
/// `PUT` requires every field except `password`; an empty or missing password keeps
/// the current one. `PATCH` only touches the fields that are present.
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UserPayloadDto {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    /// Replaces the user's group memberships when present
    pub user_groups: Option<Vec<Uuid>>,
}
