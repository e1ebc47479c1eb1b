//! User factory for creating test user entities.
//!
//! The factory stores whatever is given as `password_hash` verbatim; tests that log in
//! must pass a real argon2 hash.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .username("john")
///     .email("john@example.com")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    language: String,
    locale: String,
    timezone: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - username: `"user_{id}"` where id is auto-incremented
    /// - email: `"user_{id}@test.com"`
    /// - first_name / last_name: `"First {id}"` / `"Last {id}"`
    /// - password_hash: a placeholder that never verifies
    /// - language / locale / timezone: `en` / `en` / `Europe/Helsinki`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("user_{}", id),
            first_name: format!("First {}", id),
            last_name: format!("Last {}", id),
            email: format!("user_{}@test.com", id),
            password_hash: "not-a-password-hash".to_string(),
            language: "en".to_string(),
            locale: "en".to_string(),
            timezone: "Europe/Helsinki".to_string(),
        }
    }

    /// Sets the username for the user.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the email for the user.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the first name for the user.
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Sets the stored password hash for the user.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    /// Sets the language for the user.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            username: ActiveValue::Set(self.username),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            email: ActiveValue::Set(self.email),
            password: ActiveValue::Set(self.password_hash),
            language: ActiveValue::Set(self.language),
            locale: ActiveValue::Set(self.locale),
            timezone: ActiveValue::Set(self.timezone),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Adds a user to a user group.
///
/// # Returns
/// - `Ok(entity::user_has_user_group::Model)` - Created membership row
/// - `Err(DbErr)` - Database error during insert (e.g. duplicate membership)
pub async fn add_user_to_group(
    db: &DatabaseConnection,
    user_id: Uuid,
    user_group_id: Uuid,
) -> Result<entity::user_has_user_group::Model, DbErr> {
    entity::user_has_user_group::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        user_group_id: ActiveValue::Set(user_group_id),
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_identity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(user.username.starts_with("user_"));
        assert!(user.email.ends_with("@test.com"));
        assert_eq!(user.language, "en");
        assert_eq!(user.created_at, user.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn adds_user_to_group() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_identity_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        let group = crate::factory::create_user_group(db, "ROLE_USER").await?;

        let membership = add_user_to_group(db, user.id, group.id).await?;

        assert_eq!(membership.user_id, user.id);
        assert_eq!(membership.user_group_id, group.id);

        Ok(())
    }
}
