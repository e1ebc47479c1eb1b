use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{
        rest::{ResolvedCriteria, RestRepository},
        user::UserRepository,
        user_group::UserGroupRepository,
    },
    error::{
        validation::{FieldError, ValidationError},
        AppError,
    },
    model::{
        criteria::Criteria,
        localization::{DEFAULT_LANGUAGE, DEFAULT_LOCALE, DEFAULT_TIMEZONE},
        principal::Principal,
        rest::{unique_ids, Membership, WriteMode},
        role::Role,
        user::{NewUser, User, UserChanges, UserParams},
        user_group::UserGroup,
    },
    service::{auth::password::hash_password_blocking, role::RoleService},
};

type UserEntity = entity::user::Entity;

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, criteria: &Criteria) -> Result<Vec<User>, AppError> {
        let criteria = ResolvedCriteria::<UserEntity>::resolve(criteria)?;
        let users = RestRepository::new(self.db).find(&criteria).await?;

        self.with_groups(users).await
    }

    pub async fn count(&self, criteria: &Criteria) -> Result<u64, AppError> {
        let criteria = ResolvedCriteria::<UserEntity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).count(&criteria).await?)
    }

    pub async fn ids(&self, criteria: &Criteria) -> Result<Vec<Uuid>, AppError> {
        let criteria = ResolvedCriteria::<UserEntity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).ids::<Uuid>(&criteria).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_id(id).await? else {
            return Ok(None);
        };
        let groups = repo.groups(id).await?;

        Ok(Some(User::from_entity(user, groups)))
    }

    /// Creates a user after validation, hashing the password.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user with groups
    /// - `Err(AppError::ValidationErr)` - Invalid fields, duplicate username/email or
    ///   unknown groups
    pub async fn create(&self, params: UserParams) -> Result<User, AppError> {
        self.validate(&params, WriteMode::Create, None).await?;

        let password_hash =
            hash_password_blocking(params.new_password().unwrap_or_default().to_string()).await?;
        let user_groups = unique_ids(params.user_groups.as_deref().unwrap_or_default());

        let new_user = NewUser {
            username: params.username.unwrap_or_default(),
            first_name: params.first_name.unwrap_or_default(),
            last_name: params.last_name.unwrap_or_default(),
            email: params.email.unwrap_or_default(),
            password_hash,
            language: params
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            locale: params.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            timezone: params
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        };

        let repo = UserRepository::new(self.db);
        let created = repo.create(new_user, &user_groups).await?;
        let groups = repo.groups(created.id).await?;

        tracing::info!("Created user {} ({})", created.username, created.id);

        Ok(User::from_entity(created, groups))
    }

    /// Replaces (`Update`) or patches (`Patch`) a user.
    ///
    /// An empty or missing password keeps the stored hash.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError::ValidationErr)` - Invalid fields
    pub async fn update(
        &self,
        id: Uuid,
        params: UserParams,
        mode: WriteMode,
    ) -> Result<Option<User>, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        self.validate(&params, mode, Some(id)).await?;

        let password_hash = match params.new_password() {
            Some(password) => Some(hash_password_blocking(password.to_string()).await?),
            None => None,
        };
        let user_groups = params.user_groups.as_deref().map(unique_ids);

        let changes = UserChanges {
            username: params.username,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            password_hash,
            language: params.language,
            locale: params.locale,
            timezone: params.timezone,
        };

        let Some(updated) = repo.update(id, changes, user_groups.as_deref()).await? else {
            return Ok(None);
        };
        let groups = repo.groups(id).await?;

        Ok(Some(User::from_entity(updated, groups)))
    }

    /// Deletes a user. A user can never delete themselves.
    ///
    /// # Arguments
    /// - `actor` - Caller performing the delete
    /// - `id` - User to delete
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The deleted user as it was
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError::BadRequest)` - Caller tried to delete themselves
    pub async fn delete(&self, actor: &Principal, id: Uuid) -> Result<Option<User>, AppError> {
        if actor.user_id() == Some(id) {
            return Err(AppError::BadRequest(
                "You cannot remove yourself...".to_string(),
            ));
        }

        let groups = UserRepository::new(self.db).groups(id).await?;
        let deleted = RestRepository::<UserEntity>::new(self.db)
            .delete_by_id(id)
            .await?;

        if let Some(user) = &deleted {
            tracing::info!("Deleted user {} ({})", user.username, user.id);
        }

        Ok(deleted.map(|user| User::from_entity(user, groups)))
    }

    /// Effective roles of a user, or `None` when the user does not exist.
    pub async fn roles(&self, id: Uuid) -> Result<Option<Vec<Role>>, AppError> {
        if UserRepository::new(self.db).find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        Ok(Some(RoleService::new(self.db).roles_for_user(id).await?))
    }

    /// Groups of a user, or `None` when the user does not exist.
    pub async fn groups(&self, id: Uuid) -> Result<Option<Vec<UserGroup>>, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let groups = repo.groups(id).await?;

        Ok(Some(groups.into_iter().map(UserGroup::from_entity).collect()))
    }

    /// Adds a user to a group.
    ///
    /// # Returns
    /// - `Ok(Membership)` - `created` is false when the user was already a member;
    ///   `items` are the user's groups afterwards
    /// - `Err(AppError::NotFound)` - User or group does not exist
    pub async fn attach_group(
        &self,
        user_id: Uuid,
        user_group_id: Uuid,
    ) -> Result<Membership<UserGroup>, AppError> {
        self.ensure_user_and_group(user_id, user_group_id).await?;

        let repo = UserRepository::new(self.db);
        let created = repo.add_group(user_id, user_group_id).await?;
        let groups = repo.groups(user_id).await?;

        Ok(Membership {
            created,
            items: groups.into_iter().map(UserGroup::from_entity).collect(),
        })
    }

    /// Removes a user from a group and returns the remaining groups.
    pub async fn detach_group(
        &self,
        user_id: Uuid,
        user_group_id: Uuid,
    ) -> Result<Vec<UserGroup>, AppError> {
        self.ensure_user_and_group(user_id, user_group_id).await?;

        let repo = UserRepository::new(self.db);
        repo.remove_group(user_id, user_group_id).await?;
        let groups = repo.groups(user_id).await?;

        Ok(groups.into_iter().map(UserGroup::from_entity).collect())
    }

    async fn ensure_user_and_group(&self, user_id: Uuid, user_group_id: Uuid) -> Result<(), AppError> {
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        if UserGroupRepository::new(self.db)
            .find_by_id(user_group_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User group not found".to_string()));
        }

        Ok(())
    }

    /// Field rules plus the checks that need the database.
    async fn validate(
        &self,
        params: &UserParams,
        mode: WriteMode,
        id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let mut errors = match params.validate(mode) {
            Ok(()) => Vec::new(),
            Err(e) => e.errors,
        };

        let repo = UserRepository::new(self.db);

        if let Some(username) = &params.username {
            if repo.username_taken(username, id).await? {
                errors.push(FieldError {
                    field: "username".to_string(),
                    message: "This value is already used.".to_string(),
                });
            }
        }

        if let Some(email) = &params.email {
            if repo.email_taken(email, id).await? {
                errors.push(FieldError {
                    field: "email".to_string(),
                    message: "This value is already used.".to_string(),
                });
            }
        }

        if let Some(user_groups) = &params.user_groups {
            let wanted = unique_ids(user_groups);
            let existing = UserGroupRepository::new(self.db)
                .count_existing(&wanted)
                .await?;

            if existing != wanted.len() as u64 {
                errors.push(FieldError {
                    field: "user_groups".to_string(),
                    message: "One or more user groups do not exist.".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors }.into())
        }
    }

    async fn with_groups(&self, users: Vec<entity::user::Model>) -> Result<Vec<User>, AppError> {
        with_groups(self.db, users).await
    }
}

/// Attaches each user's groups with a single membership query.
pub(super) async fn with_groups(
    db: &DatabaseConnection,
    users: Vec<entity::user::Model>,
) -> Result<Vec<User>, AppError> {
    let ids: Vec<Uuid> = users.iter().map(|user| user.id).collect();
    let mut groups = UserRepository::new(db).groups_for_users(&ids).await?;

    Ok(users
        .into_iter()
        .map(|user| {
            let user_groups = groups.remove(&user.id).unwrap_or_default();
            User::from_entity(user, user_groups)
        })
        .collect())
}
