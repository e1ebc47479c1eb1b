use sea_orm::entity::prelude::*;

use crate::timestamp::touch;

/// Application user. `password` always holds an argon2 hash, never the plain value.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub language: String,
    pub locale: String,
    pub timezone: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_has_user_group::Entity")]
    UserHasUserGroup,
    #[sea_orm(has_many = "super::log_login::Entity")]
    LogLogin,
    #[sea_orm(has_many = "super::log_login_failure::Entity")]
    LogLoginFailure,
    #[sea_orm(has_many = "super::log_request::Entity")]
    LogRequest,
}

impl Related<super::user_group::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_has_user_group::Relation::UserGroup.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_has_user_group::Relation::User.def().rev())
    }
}

impl Related<super::log_login_failure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LogLoginFailure.def()
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
