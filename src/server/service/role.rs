use sea_orm::DatabaseConnection;
use std::iter;
use uuid::Uuid;

use crate::server::{
    data::{
        rest::{ResolvedCriteria, RestRepository},
        role::RoleRepository,
    },
    error::AppError,
    model::{
        criteria::Criteria,
        role::{Role, RoleRecord},
    },
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, criteria: &Criteria) -> Result<Vec<RoleRecord>, AppError> {
        let criteria = ResolvedCriteria::<entity::role::Entity>::resolve(criteria)?;
        let roles = RestRepository::new(self.db).find(&criteria).await?;

        Ok(roles.into_iter().map(RoleRecord::from_entity).collect())
    }

    pub async fn count(&self, criteria: &Criteria) -> Result<u64, AppError> {
        let criteria = ResolvedCriteria::<entity::role::Entity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).count(&criteria).await?)
    }

    pub async fn ids(&self, criteria: &Criteria) -> Result<Vec<String>, AppError> {
        let criteria = ResolvedCriteria::<entity::role::Entity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).ids::<String>(&criteria).await?)
    }

    pub async fn find_by_id(&self, role: &str) -> Result<Option<RoleRecord>, AppError> {
        let role = RoleRepository::new(self.db).find_by_id(role).await?;

        Ok(role.map(RoleRecord::from_entity))
    }

    /// The role and every role below it in the hierarchy.
    ///
    /// # Returns
    /// - `Ok(Some(roles))` - Role names in hierarchy order
    /// - `Ok(None)` - Role does not exist
    pub async fn inherited(&self, role: &str) -> Result<Option<Vec<Role>>, AppError> {
        if RoleRepository::new(self.db).find_by_id(role).await?.is_none() {
            return Ok(None);
        }

        Ok(role.parse::<Role>().ok().map(|role| role.inherited()))
    }

    /// Effective roles of a user: `ROLE_LOGGED` plus its groups' roles, expanded.
    pub async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, AppError> {
        let granted = RoleRepository::new(self.db)
            .group_roles_for_user(user_id)
            .await?;

        Ok(Role::expand(
            iter::once(Role::Logged).chain(parse_roles(granted)),
        ))
    }

    /// Effective roles of an API key: `ROLE_API` plus its groups' roles, expanded.
    pub async fn roles_for_api_key(&self, api_key_id: Uuid) -> Result<Vec<Role>, AppError> {
        let granted = RoleRepository::new(self.db)
            .group_roles_for_api_key(api_key_id)
            .await?;

        Ok(Role::expand(iter::once(Role::Api).chain(parse_roles(granted))))
    }
}

/// Parses stored role names, skipping any that are not part of the hierarchy.
fn parse_roles(names: Vec<String>) -> Vec<Role> {
    names
        .into_iter()
        .filter_map(|name| match name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!("Ignoring role outside the hierarchy: {}", e);
                None
            }
        })
        .collect()
}
