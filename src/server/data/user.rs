use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::{
    data::rest::RestEntity,
    model::user::{NewUser, UserChanges},
};

impl RestEntity for entity::user::Entity {
    fn id_column() -> Self::Column {
        entity::user::Column::Id
    }

    fn search_columns() -> Vec<Self::Column> {
        vec![
            entity::user::Column::Username,
            entity::user::Column::FirstName,
            entity::user::Column::LastName,
            entity::user::Column::Email,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(entity::user::Column::Username, Order::Asc)]
    }

    fn hidden_columns() -> Vec<Self::Column> {
        vec![entity::user::Column::Password]
    }
}

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Finds the user a login identifier refers to, matching username or email.
    pub async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Username.eq(identifier))
                    .add(entity::user::Column::Email.eq(identifier)),
            )
            .one(self.db)
            .await
    }

    /// Whether another user already has `username`.
    ///
    /// # Arguments
    /// - `username` - Username to check
    /// - `except` - User to ignore, i.e. the one being updated
    pub async fn username_taken(&self, username: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Username.eq(username));

        if let Some(id) = except {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Whether another user already has `email`.
    pub async fn email_taken(&self, email: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find().filter(entity::user::Column::Email.eq(email));

        if let Some(id) = except {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Inserts a user together with its group memberships in one transaction.
    pub async fn create(
        &self,
        user: NewUser,
        user_groups: &[Uuid],
    ) -> Result<entity::user::Model, DbErr> {
        let txn = self.db.begin().await?;

        let created = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::now_v7()),
            username: ActiveValue::Set(user.username),
            first_name: ActiveValue::Set(user.first_name),
            last_name: ActiveValue::Set(user.last_name),
            email: ActiveValue::Set(user.email),
            password: ActiveValue::Set(user.password_hash),
            language: ActiveValue::Set(user.language),
            locale: ActiveValue::Set(user.locale),
            timezone: ActiveValue::Set(user.timezone),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for user_group_id in user_groups {
            entity::user_has_user_group::ActiveModel {
                user_id: ActiveValue::Set(created.id),
                user_group_id: ActiveValue::Set(*user_group_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(created)
    }

    /// Applies column changes and optionally replaces group memberships.
    ///
    /// # Arguments
    /// - `id` - User to update
    /// - `changes` - Columns to write; `None` fields are left untouched
    /// - `user_groups` - New complete set of groups, or `None` to keep memberships
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error, nothing was written
    pub async fn update(
        &self,
        id: Uuid,
        changes: UserChanges,
        user_groups: Option<&[Uuid]>,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::User::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut user = existing.into_active_model();

        if let Some(username) = changes.username {
            user.username = ActiveValue::Set(username);
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = ActiveValue::Set(last_name);
        }
        if let Some(email) = changes.email {
            user.email = ActiveValue::Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            user.password = ActiveValue::Set(password_hash);
        }
        if let Some(language) = changes.language {
            user.language = ActiveValue::Set(language);
        }
        if let Some(locale) = changes.locale {
            user.locale = ActiveValue::Set(locale);
        }
        if let Some(timezone) = changes.timezone {
            user.timezone = ActiveValue::Set(timezone);
        }

        let updated = user.update(&txn).await?;

        if let Some(user_groups) = user_groups {
            entity::prelude::UserHasUserGroup::delete_many()
                .filter(entity::user_has_user_group::Column::UserId.eq(id))
                .exec(&txn)
                .await?;

            for user_group_id in user_groups {
                entity::user_has_user_group::ActiveModel {
                    user_id: ActiveValue::Set(id),
                    user_group_id: ActiveValue::Set(*user_group_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        Ok(Some(updated))
    }

    /// Groups of a single user, ordered by name.
    pub async fn groups(&self, user_id: Uuid) -> Result<Vec<entity::user_group::Model>, DbErr> {
        entity::prelude::UserGroup::find()
            .join(
                JoinType::InnerJoin,
                entity::user_group::Relation::UserHasUserGroup.def(),
            )
            .filter(entity::user_has_user_group::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_group::Column::Name)
            .all(self.db)
            .await
    }

    /// Groups of many users at once, keyed by user id. Users without groups are absent.
    pub async fn groups_for_users(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<entity::user_group::Model>>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let memberships = entity::prelude::UserHasUserGroup::find()
            .filter(entity::user_has_user_group::Column::UserId.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await?;

        let group_ids: Vec<Uuid> = memberships.iter().map(|m| m.user_group_id).collect();

        let groups: HashMap<Uuid, entity::user_group::Model> = entity::prelude::UserGroup::find()
            .filter(entity::user_group::Column::Id.is_in(group_ids))
            .order_by_asc(entity::user_group::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(|group| (group.id, group))
            .collect();

        let mut result: HashMap<Uuid, Vec<entity::user_group::Model>> = HashMap::new();
        for membership in memberships {
            if let Some(group) = groups.get(&membership.user_group_id) {
                result
                    .entry(membership.user_id)
                    .or_default()
                    .push(group.clone());
            }
        }

        for groups in result.values_mut() {
            groups.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(result)
    }

    /// Adds a user to a group.
    ///
    /// # Returns
    /// - `Ok(true)` - Membership created
    /// - `Ok(false)` - User was already a member
    pub async fn add_group(&self, user_id: Uuid, user_group_id: Uuid) -> Result<bool, DbErr> {
        let existing = entity::prelude::UserHasUserGroup::find_by_id((user_id, user_group_id))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        entity::user_has_user_group::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            user_group_id: ActiveValue::Set(user_group_id),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes a user from a group. Returns whether a membership existed.
    pub async fn remove_group(&self, user_id: Uuid, user_group_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::UserHasUserGroup::delete_many()
            .filter(entity::user_has_user_group::Column::UserId.eq(user_id))
            .filter(entity::user_has_user_group::Column::UserGroupId.eq(user_group_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
