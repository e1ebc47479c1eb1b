//! Role seeding for tests.

use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Inserts the built-in roles, the same rows the seed migration writes.
///
/// # Arguments
/// - `db` - Database connection with the `role` table created
///
/// # Returns
/// - `Ok(())` - Roles inserted
/// - `Err(DbErr)` - Database error during insert
pub async fn seed_roles(db: &DatabaseConnection) -> Result<(), DbErr> {
    let models = migration::ROLES
        .iter()
        .map(|(role, description)| entity::role::ActiveModel {
            role: ActiveValue::Set(role.to_string()),
            description: ActiveValue::Set(description.to_string()),
        });

    entity::prelude::Role::insert_many(models).exec(db).await?;

    Ok(())
}
