use sea_orm::entity::prelude::*;

use crate::timestamp::touch;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "api_key")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub token: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::api_key_has_user_group::Entity")]
    ApiKeyHasUserGroup,
    #[sea_orm(has_many = "super::log_request::Entity")]
    LogRequest,
}

impl Related<super::user_group::Entity> for Entity {
    fn to() -> RelationDef {
        super::api_key_has_user_group::Relation::UserGroup.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::api_key_has_user_group::Relation::ApiKey.def().rev())
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
