use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct LoginDto {
    /// Username or email address
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TokenDto {
    pub token: String,
}

/// The authenticated user together with its effective roles.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ProfileDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub roles: Vec<String>,
}
