use super::*;
use sea_orm::{EntityTrait, ModelTrait};
use uuid::Uuid;

use crate::server::data::user_group::UserGroupRepository;

/// Tests creating and partially updating a group.
#[tokio::test]
async fn creates_and_updates_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserGroupRepository::new(db);

    let group = repo
        .create("Admins".to_string(), "ROLE_ADMIN".to_string())
        .await?;
    assert_eq!(group.role, "ROLE_ADMIN");

    let updated = repo
        .update(group.id, None, Some("ROLE_ROOT".to_string()))
        .await?
        .unwrap();
    assert_eq!(updated.name, "Admins");
    assert_eq!(updated.role, "ROLE_ROOT");

    assert!(repo.update(Uuid::now_v7(), None, None).await?.is_none());

    Ok(())
}

/// Tests that a group cannot reference a role that does not exist.
///
/// Expected: Err from the foreign key
#[tokio::test]
async fn rejects_unknown_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserGroupRepository::new(db);
    let result = repo
        .create("Ghosts".to_string(), "ROLE_GHOST".to_string())
        .await;

    assert!(result.is_err());

    Ok(())
}

/// Tests counting existing ids among a mix of real and unknown ids.
#[tokio::test]
async fn counts_existing_groups() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user_group(db, "ROLE_USER").await?;
    let second = factory::create_user_group(db, "ROLE_USER").await?;

    let repo = UserGroupRepository::new(db);

    assert_eq!(repo.count_existing(&[]).await?, 0);
    assert_eq!(
        repo.count_existing(&[first.id, second.id, Uuid::now_v7()])
            .await?,
        2
    );

    Ok(())
}

/// Tests listing group members ordered by username.
#[tokio::test]
async fn lists_users_of_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_user_group(db, "ROLE_USER").await?;
    let zed = factory::user::UserFactory::new(db).username("zed").build().await?;
    let amy = factory::user::UserFactory::new(db).username("amy").build().await?;
    factory::create_user(db).await?;

    factory::user::add_user_to_group(db, zed.id, group.id).await?;
    factory::user::add_user_to_group(db, amy.id, group.id).await?;

    let repo = UserGroupRepository::new(db);
    let usernames: Vec<String> = repo
        .users(group.id)
        .await?
        .into_iter()
        .map(|user| user.username)
        .collect();

    assert_eq!(usernames, vec!["amy", "zed"]);

    Ok(())
}

/// Tests that membership rows resolve to their user, API key and group.
#[tokio::test]
async fn membership_rows_relate_both_sides() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let api_key = factory::create_api_key(db).await?;
    let group = factory::create_user_group(db, "ROLE_USER").await?;
    factory::user::add_user_to_group(db, user.id, group.id).await?;
    factory::api_key::add_api_key_to_group(db, api_key.id, group.id).await?;

    let users = entity::prelude::UserHasUserGroup::find()
        .find_also_related(entity::prelude::User)
        .all(db)
        .await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].1.as_ref().map(|u| u.id), Some(user.id));

    let groups = entity::prelude::ApiKeyHasUserGroup::find()
        .find_also_related(entity::prelude::UserGroup)
        .all(db)
        .await?;
    assert_eq!(groups[0].1.as_ref().map(|g| g.id), Some(group.id));

    let members = group.find_related(entity::prelude::User).all(db).await?;
    assert_eq!(members.len(), 1);

    Ok(())
}
