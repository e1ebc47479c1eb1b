use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000002_create_user_group_table::UserGroup,
    m20261001_000003_create_user_table::User,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserHasUserGroup::Table)
                    .if_not_exists()
                    .col(uuid(UserHasUserGroup::UserId))
                    .col(uuid(UserHasUserGroup::UserGroupId))
                    .primary_key(
                        Index::create()
                            .col(UserHasUserGroup::UserId)
                            .col(UserHasUserGroup::UserGroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_has_user_group_user_id")
                            .from(UserHasUserGroup::Table, UserHasUserGroup::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_has_user_group_user_group_id")
                            .from(UserHasUserGroup::Table, UserHasUserGroup::UserGroupId)
                            .to(UserGroup::Table, UserGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserHasUserGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserHasUserGroup {
    Table,
    UserId,
    UserGroupId,
}
