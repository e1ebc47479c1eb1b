use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{
        rest::{ResolvedCriteria, RestRepository},
        role::RoleRepository,
        user::UserRepository,
        user_group::UserGroupRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        criteria::Criteria,
        rest::{Membership, WriteMode},
        user::User,
        user_group::{UserGroup, UserGroupParams},
    },
    service::user::with_groups,
};

type UserGroupEntity = entity::user_group::Entity;

pub struct UserGroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserGroupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, criteria: &Criteria) -> Result<Vec<UserGroup>, AppError> {
        let criteria = ResolvedCriteria::<UserGroupEntity>::resolve(criteria)?;
        let groups = RestRepository::new(self.db).find(&criteria).await?;

        Ok(groups.into_iter().map(UserGroup::from_entity).collect())
    }

    pub async fn count(&self, criteria: &Criteria) -> Result<u64, AppError> {
        let criteria = ResolvedCriteria::<UserGroupEntity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).count(&criteria).await?)
    }

    pub async fn ids(&self, criteria: &Criteria) -> Result<Vec<Uuid>, AppError> {
        let criteria = ResolvedCriteria::<UserGroupEntity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).ids::<Uuid>(&criteria).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserGroup>, AppError> {
        let group = UserGroupRepository::new(self.db).find_by_id(id).await?;

        Ok(group.map(UserGroup::from_entity))
    }

    /// Creates a group bound to an existing role.
    ///
    /// # Returns
    /// - `Ok(UserGroup)` - Created group
    /// - `Err(AppError::ValidationErr)` - Invalid name or unknown role
    pub async fn create(&self, params: UserGroupParams) -> Result<UserGroup, AppError> {
        self.validate(&params, WriteMode::Create).await?;

        let created = UserGroupRepository::new(self.db)
            .create(
                params.name.unwrap_or_default(),
                params.role.unwrap_or_default(),
            )
            .await?;

        tracing::info!("Created user group {} ({})", created.name, created.id);

        Ok(UserGroup::from_entity(created))
    }

    /// Replaces (`Update`) or patches (`Patch`) a group.
    ///
    /// # Returns
    /// - `Ok(Some(UserGroup))` - Updated group
    /// - `Ok(None)` - No group with that id
    pub async fn update(
        &self,
        id: Uuid,
        params: UserGroupParams,
        mode: WriteMode,
    ) -> Result<Option<UserGroup>, AppError> {
        let repo = UserGroupRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        self.validate(&params, mode).await?;

        let updated = repo.update(id, params.name, params.role).await?;

        Ok(updated.map(UserGroup::from_entity))
    }

    /// Deletes a group; memberships cascade.
    pub async fn delete(&self, id: Uuid) -> Result<Option<UserGroup>, AppError> {
        let deleted = RestRepository::<UserGroupEntity>::new(self.db)
            .delete_by_id(id)
            .await?;

        if let Some(group) = &deleted {
            tracing::info!("Deleted user group {} ({})", group.name, group.id);
        }

        Ok(deleted.map(UserGroup::from_entity))
    }

    /// Members of a group, or `None` when the group does not exist.
    pub async fn users(&self, id: Uuid) -> Result<Option<Vec<User>>, AppError> {
        let repo = UserGroupRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let users = repo.users(id).await?;

        Ok(Some(with_groups(self.db, users).await?))
    }

    /// Adds a user to the group.
    ///
    /// # Returns
    /// - `Ok(Membership)` - `created` is false when the user already was a member;
    ///   `items` are the group's members afterwards
    /// - `Err(AppError::NotFound)` - Group or user does not exist
    pub async fn attach_user(
        &self,
        user_group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Membership<User>, AppError> {
        self.ensure_group_and_user(user_group_id, user_id).await?;

        let created = UserRepository::new(self.db)
            .add_group(user_id, user_group_id)
            .await?;
        let users = UserGroupRepository::new(self.db).users(user_group_id).await?;

        Ok(Membership {
            created,
            items: with_groups(self.db, users).await?,
        })
    }

    /// Removes a user from the group and returns the remaining members.
    pub async fn detach_user(&self, user_group_id: Uuid, user_id: Uuid) -> Result<Vec<User>, AppError> {
        self.ensure_group_and_user(user_group_id, user_id).await?;

        UserRepository::new(self.db)
            .remove_group(user_id, user_group_id)
            .await?;
        let users = UserGroupRepository::new(self.db).users(user_group_id).await?;

        with_groups(self.db, users).await
    }

    async fn ensure_group_and_user(&self, user_group_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if UserGroupRepository::new(self.db)
            .find_by_id(user_group_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User group not found".to_string()));
        }

        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    async fn validate(&self, params: &UserGroupParams, mode: WriteMode) -> Result<(), AppError> {
        let mut errors = match params.validate(mode) {
            Ok(()) => Vec::new(),
            Err(e) => e.errors,
        };

        if let Some(role) = &params.role {
            if RoleRepository::new(self.db).find_by_id(role).await?.is_none() {
                errors.extend(
                    ValidationError::field("role", format!("Role '{}' does not exist.", role)).errors,
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors }.into())
        }
    }
}
