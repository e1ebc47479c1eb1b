use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_role_table::Role;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserGroup::Table)
                    .if_not_exists()
                    .col(pk_uuid(UserGroup::Id))
                    .col(string_len(UserGroup::Role, 50))
                    .col(string(UserGroup::Name))
                    .col(timestamp_with_time_zone(UserGroup::CreatedAt))
                    .col(timestamp_with_time_zone(UserGroup::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_group_role")
                            .from(UserGroup::Table, UserGroup::Role)
                            .to(Role::Table, Role::Role)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserGroup {
    Table,
    Id,
    Role,
    Name,
    CreatedAt,
    UpdatedAt,
}
