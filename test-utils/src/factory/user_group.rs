//! User group factory for creating test user group entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating test user groups with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let group = UserGroupFactory::new(&db, "ROLE_ROOT").name("Root users").build().await?;
/// ```
pub struct UserGroupFactory<'a> {
    db: &'a DatabaseConnection,
    role: String,
    name: String,
}

impl<'a> UserGroupFactory<'a> {
    /// Creates a new UserGroupFactory for the given role.
    ///
    /// Defaults:
    /// - name: `"Group {id}"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `role` - Role string the group grants, e.g. `ROLE_ADMIN`
    pub fn new(db: &'a DatabaseConnection, role: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            role: role.into(),
            name: format!("Group {}", id),
        }
    }

    /// Sets the name for the group.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the user group entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user_group::Model)` - Created user group entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_group::Model, DbErr> {
        entity::user_group::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            role: ActiveValue::Set(self.role),
            name: ActiveValue::Set(self.name),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user group for `role` with default values.
///
/// Shorthand for `UserGroupFactory::new(db, role).build().await`.
pub async fn create_user_group(
    db: &DatabaseConnection,
    role: impl Into<String>,
) -> Result<entity::user_group::Model, DbErr> {
    UserGroupFactory::new(db, role).build().await
}
