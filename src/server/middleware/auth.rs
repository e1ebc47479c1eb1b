use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    config::Config,
    error::{auth::AuthError, AppError},
    model::{principal::Principal, role::Role},
    service::auth::AuthService,
};

/// Access rule checked by `AuthGuard::require`.
#[derive(Debug, Clone, Copy)]
pub enum Permission {
    /// Principal holds the role, directly or through the hierarchy.
    Role(Role),
    /// Principal is the given user, or holds the role.
    SelfOrRole(Uuid, Role),
    /// Principal authenticated as a user, not with an API key.
    UserOnly,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            config,
            headers,
        }
    }

    /// Authenticates the request and checks every permission.
    ///
    /// # Arguments
    /// - `permissions` - All must hold; an empty slice only requires authentication
    ///
    /// # Returns
    /// - `Ok(Principal)` - Authenticated caller
    /// - `Err(AuthError)` - 401 for missing or invalid credentials, 403 for a missing role
    pub async fn require(&self, permissions: &[Permission]) -> Result<Principal, AppError> {
        let authorization = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let principal = AuthService::new(self.db, self.config)
            .authenticate(authorization)
            .await?;

        for permission in permissions {
            match *permission {
                Permission::Role(role) => {
                    if !principal.has_role(role) {
                        return Err(AuthError::AccessDenied(
                            principal.identifier(),
                            format!("missing {}", role),
                        )
                        .into());
                    }
                }
                Permission::SelfOrRole(user_id, role) => {
                    if principal.user_id() != Some(user_id) && !principal.has_role(role) {
                        return Err(AuthError::AccessDenied(
                            principal.identifier(),
                            format!("not user {} and missing {}", user_id, role),
                        )
                        .into());
                    }
                }
                Permission::UserOnly => {
                    if let Some(api_key_id) = principal.api_key_id() {
                        return Err(AuthError::UserRequired(api_key_id).into());
                    }
                }
            }
        }

        Ok(principal)
    }
}
