use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

use crate::server::data::rest::RestEntity;

impl RestEntity for entity::user_group::Entity {
    fn id_column() -> Self::Column {
        entity::user_group::Column::Id
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![
            entity::user_group::Column::Name,
            entity::user_group::Column::Role,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(entity::user_group::Column::Name, Order::Asc)]
    }
}

pub struct UserGroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserGroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::user_group::Model>, DbErr> {
        entity::prelude::UserGroup::find_by_id(id).one(self.db).await
    }

    /// Number of the given group ids that exist.
    pub async fn count_existing(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::UserGroup::find()
            .filter(entity::user_group::Column::Id.is_in(ids.iter().copied()))
            .count(self.db)
            .await
    }

    pub async fn create(&self, name: String, role: String) -> Result<entity::user_group::Model, DbErr> {
        entity::user_group::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            name: ActiveValue::Set(name),
            role: ActiveValue::Set(role),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Updates name and/or role; `None` leaves the column untouched.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated group
    /// - `Ok(None)` - No group with that id
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<String>,
    ) -> Result<Option<entity::user_group::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut group = existing.into_active_model();

        if let Some(name) = name {
            group.name = ActiveValue::Set(name);
        }
        if let Some(role) = role {
            group.role = ActiveValue::Set(role);
        }

        Ok(Some(group.update(self.db).await?))
    }

    /// Members of a group, ordered by username.
    pub async fn users(&self, user_group_id: Uuid) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .join(
                JoinType::InnerJoin,
                entity::user::Relation::UserHasUserGroup.def(),
            )
            .filter(entity::user_has_user_group::Column::UserGroupId.eq(user_group_id))
            .order_by_asc(entity::user::Column::Username)
            .all(self.db)
            .await
    }
}
