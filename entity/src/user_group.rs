use sea_orm::entity::prelude::*;

use crate::timestamp::touch;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub role: String,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::Role",
        to = "super::role::Column::Role",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Role,
    #[sea_orm(has_many = "super::user_has_user_group::Entity")]
    UserHasUserGroup,
    #[sea_orm(has_many = "super::api_key_has_user_group::Entity")]
    ApiKeyHasUserGroup,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_has_user_group::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_has_user_group::Relation::UserGroup.def().rev())
    }
}

impl Related<super::api_key::Entity> for Entity {
    fn to() -> RelationDef {
        super::api_key_has_user_group::Relation::ApiKey.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::api_key_has_user_group::Relation::UserGroup.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        touch(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
