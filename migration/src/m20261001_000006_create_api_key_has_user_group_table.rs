use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000002_create_user_group_table::UserGroup,
    m20261001_000005_create_api_key_table::ApiKey,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiKeyHasUserGroup::Table)
                    .if_not_exists()
                    .col(uuid(ApiKeyHasUserGroup::ApiKeyId))
                    .col(uuid(ApiKeyHasUserGroup::UserGroupId))
                    .primary_key(
                        Index::create()
                            .col(ApiKeyHasUserGroup::ApiKeyId)
                            .col(ApiKeyHasUserGroup::UserGroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_api_key_has_user_group_api_key_id")
                            .from(ApiKeyHasUserGroup::Table, ApiKeyHasUserGroup::ApiKeyId)
                            .to(ApiKey::Table, ApiKey::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_api_key_has_user_group_user_group_id")
                            .from(ApiKeyHasUserGroup::Table, ApiKeyHasUserGroup::UserGroupId)
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
            .drop_table(Table::drop().table(ApiKeyHasUserGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ApiKeyHasUserGroup {
    Table,
    ApiKeyId,
    UserGroupId,
}
