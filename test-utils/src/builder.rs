use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError, factory};

/// Builder for creating test contexts with customizable database schemas.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Role, UserGroup};
///
/// let test = TestBuilder::new()
///     .with_table(Role)
///     .with_table(UserGroup)
///     .with_roles()
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements, executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Whether the built-in roles are inserted after the tables are created.
    seed_roles: bool,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            seed_roles: false,
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables should be added in dependency order (tables with foreign keys after the
    /// tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Inserts the five built-in roles once the tables exist.
    ///
    /// Requires the `Role` table to be part of the schema.
    pub fn with_roles(mut self) -> Self {
        self.seed_roles = true;
        self
    }

    /// Adds every table needed for users, groups, roles and API keys, and seeds the roles.
    ///
    /// Tables added, in dependency order:
    /// - Role
    /// - UserGroup
    /// - User
    /// - UserHasUserGroup
    /// - ApiKey
    /// - ApiKeyHasUserGroup
    pub fn with_identity_tables(self) -> Self {
        self.with_table(Role)
            .with_table(UserGroup)
            .with_table(User)
            .with_table(UserHasUserGroup)
            .with_table(ApiKey)
            .with_table(ApiKeyHasUserGroup)
            .with_roles()
    }

    /// Adds the identity tables plus the login and request log tables.
    pub fn with_log_tables(self) -> Self {
        self.with_identity_tables()
            .with_table(LogLogin)
            .with_table(LogLoginFailure)
            .with_table(LogRequest)
    }

    /// Adds every table of the application.
    pub fn with_all_tables(self) -> Self {
        self.with_log_tables()
            .with_table(DateDimension)
            .with_table(Healthz)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect, create tables or seed roles
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        if self.seed_roles {
            let db = setup.database().await?;
            factory::role::seed_roles(db).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
