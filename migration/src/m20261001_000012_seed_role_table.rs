use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_role_table::Role;

/// Built-in roles and their descriptions, in hierarchy order.
pub const ROLES: [(&str, &str); 5] = [
    ("ROLE_LOGGED", "Logged in users"),
    ("ROLE_USER", "Normal users"),
    ("ROLE_ADMIN", "Admin users"),
    ("ROLE_ROOT", "Root users"),
    ("ROLE_API", "API users"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Role::Table)
            .columns([Role::Role, Role::Description]);

        for (role, description) in ROLES {
            insert.values_panic([role.into(), description.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let roles: Vec<&str> = ROLES.iter().map(|(role, _)| *role).collect();

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Role::Table)
                    .and_where(Expr::col(Role::Role).is_in(roles))
                    .to_owned(),
            )
            .await
    }
}
