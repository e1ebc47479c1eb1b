use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserGroupDto {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating, replacing or patching a user group.
///
/// Every field is optional at the JSON level; which fields are required depends on
/// the HTTP method (`POST` and `PUT` require all of them).
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UserGroupPayloadDto {
    pub name: Option<String>,
    pub role: Option<String>,
}
