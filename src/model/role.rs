use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RoleDto {
    /// Role identifier, e.g. `ROLE_ADMIN`
    pub role: String,
    pub description: String,
}
