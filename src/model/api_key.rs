use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::user_group::UserGroupDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ApiKeyDto {
    pub id: Uuid,
    /// 40 character token sent as `Authorization: ApiKey <token>`
    pub token: String,
    pub description: String,
    pub user_groups: Vec<UserGroupDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating, replacing or patching an API key. The token itself is
/// always generated by the server.
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct ApiKeyPayloadDto {
    pub description: Option<String>,
    pub user_groups: Option<Vec<Uuid>>,
}
