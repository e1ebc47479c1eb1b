use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, Order, QueryFilter,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::server::data::rest::RestEntity;

impl RestEntity for entity::role::Entity {
    fn id_column() -> Self::Column {
        entity::role::Column::Role
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![entity::role::Column::Role, entity::role::Column::Description]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(entity::role::Column::Role, Order::Asc)]
    }
}

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, role: &str) -> Result<Option<entity::role::Model>, DbErr> {
        entity::prelude::Role::find_by_id(role.to_string())
            .one(self.db)
            .await
    }

    /// Roles granted directly by the groups of a user, before hierarchy expansion.
    pub async fn group_roles_for_user(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        entity::prelude::UserGroup::find()
            .select_only()
            .column(entity::user_group::Column::Role)
            .distinct()
            .join(
                JoinType::InnerJoin,
                entity::user_group::Relation::UserHasUserGroup.def(),
            )
            .filter(entity::user_has_user_group::Column::UserId.eq(user_id))
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Roles granted directly by the groups of an API key, before hierarchy expansion.
    pub async fn group_roles_for_api_key(&self, api_key_id: Uuid) -> Result<Vec<String>, DbErr> {
        entity::prelude::UserGroup::find()
            .select_only()
            .column(entity::user_group::Column::Role)
            .distinct()
            .join(
                JoinType::InnerJoin,
                entity::user_group::Relation::ApiKeyHasUserGroup.def(),
            )
            .filter(entity::api_key_has_user_group::Column::ApiKeyId.eq(api_key_id))
            .into_tuple::<String>()
            .all(self.db)
            .await
    }
}
