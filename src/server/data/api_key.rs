use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::data::rest::RestEntity;

impl RestEntity for entity::api_key::Entity {
    fn id_column() -> Self::Column {
        entity::api_key::Column::Id
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![
            entity::api_key::Column::Token,
            entity::api_key::Column::Description,
        ]
    }
}

pub struct ApiKeyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiKeyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::api_key::Model>, DbErr> {
        entity::prelude::ApiKey::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<entity::api_key::Model>, DbErr> {
        entity::prelude::ApiKey::find()
            .filter(entity::api_key::Column::Token.eq(token))
            .one(self.db)
            .await
    }

    pub async fn token_exists(&self, token: &str) -> Result<bool, DbErr> {
        Ok(entity::prelude::ApiKey::find()
            .filter(entity::api_key::Column::Token.eq(token))
            .count(self.db)
            .await?
            > 0)
    }

    /// Inserts an API key together with its group memberships in one transaction.
    pub async fn create(
        &self,
        token: String,
        description: String,
        user_groups: &[Uuid],
    ) -> Result<entity::api_key::Model, DbErr> {
        let txn = self.db.begin().await?;

        let created = entity::api_key::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            token: ActiveValue::Set(token),
            description: ActiveValue::Set(description),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for user_group_id in user_groups {
            entity::api_key_has_user_group::ActiveModel {
                api_key_id: ActiveValue::Set(created.id),
                user_group_id: ActiveValue::Set(*user_group_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(created)
    }

    /// Updates the description and optionally replaces group memberships. The token is
    /// never changed.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated API key
    /// - `Ok(None)` - No API key with that id
    pub async fn update(
        &self,
        id: Uuid,
        description: Option<String>,
        user_groups: Option<&[Uuid]>,
    ) -> Result<Option<entity::api_key::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::ApiKey::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut api_key = existing.into_active_model();

        if let Some(description) = description {
            api_key.description = ActiveValue::Set(description);
        }

        let updated = api_key.update(&txn).await?;

        if let Some(user_groups) = user_groups {
            entity::prelude::ApiKeyHasUserGroup::delete_many()
                .filter(entity::api_key_has_user_group::Column::ApiKeyId.eq(id))
                .exec(&txn)
                .await?;

            for user_group_id in user_groups {
                entity::api_key_has_user_group::ActiveModel {
                    api_key_id: ActiveValue::Set(id),
                    user_group_id: ActiveValue::Set(*user_group_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        Ok(Some(updated))
    }

    /// Groups of a single API key, ordered by name.
    pub async fn groups(&self, api_key_id: Uuid) -> Result<Vec<entity::user_group::Model>, DbErr> {
        entity::prelude::UserGroup::find()
            .join(
                JoinType::InnerJoin,
                entity::user_group::Relation::ApiKeyHasUserGroup.def(),
            )
            .filter(entity::api_key_has_user_group::Column::ApiKeyId.eq(api_key_id))
            .order_by_asc(entity::user_group::Column::Name)
            .all(self.db)
            .await
    }

    /// Groups of many API keys at once, keyed by API key id.
    pub async fn groups_for_api_keys(
        &self,
        api_key_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<entity::user_group::Model>>, DbErr> {
        if api_key_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let memberships = entity::prelude::ApiKeyHasUserGroup::find()
            .filter(
                entity::api_key_has_user_group::Column::ApiKeyId.is_in(api_key_ids.iter().copied()),
            )
            .all(self.db)
            .await?;

        let group_ids: Vec<Uuid> = memberships.iter().map(|m| m.user_group_id).collect();

        let groups: HashMap<Uuid, entity::user_group::Model> = entity::prelude::UserGroup::find()
            .filter(entity::user_group::Column::Id.is_in(group_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|group| (group.id, group))
            .collect();

        let mut result: HashMap<Uuid, Vec<entity::user_group::Model>> = HashMap::new();
        for membership in memberships {
            if let Some(group) = groups.get(&membership.user_group_id) {
                result
                    .entry(membership.api_key_id)
                    .or_default()
                    .push(group.clone());
            }
        }

        for groups in result.values_mut() {
            groups.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(result)
    }
}
