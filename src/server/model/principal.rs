use uuid::Uuid;

use crate::server::model::role::Role;

/// The authenticated caller of a request.
///
/// `roles` are always the effective roles, already expanded through the hierarchy.
#[derive(Debug, Clone)]
pub enum Principal {
    /// Authenticated with a bearer JWT; the user row is reloaded on every request.
    User {
        user: entity::user::Model,
        roles: Vec<Role>,
    },
    /// Authenticated with `Authorization: ApiKey <token>`.
    ApiKey {
        api_key: entity::api_key::Model,
        roles: Vec<Role>,
    },
}

impl Principal {
    pub fn roles(&self) -> &[Role] {
        match self {
            Principal::User { roles, .. } | Principal::ApiKey { roles, .. } => roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::User { user, .. } => Some(user.id),
            Principal::ApiKey { .. } => None,
        }
    }

    pub fn api_key_id(&self) -> Option<Uuid> {
        match self {
            Principal::User { .. } => None,
            Principal::ApiKey { api_key, .. } => Some(api_key.id),
        }
    }

    /// Identifier used in log messages, e.g. `user:<uuid>`.
    pub fn identifier(&self) -> String {
        match self {
            Principal::User { user, .. } => format!("user:{}", user.id),
            Principal::ApiKey { api_key, .. } => format!("api_key:{}", api_key.id),
        }
    }
}
