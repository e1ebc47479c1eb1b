use super::*;
use uuid::Uuid;

use crate::server::{
    model::{rest::WriteMode, user_group::UserGroupParams},
    service::user_group::UserGroupService,
};

fn params(name: &str, role: &str) -> UserGroupParams {
    UserGroupParams {
        name: Some(name.to_string()),
        role: Some(role.to_string()),
    }
}

/// Tests creating a group and the validation of its role.
#[tokio::test]
async fn creates_group_for_existing_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = UserGroupService::new(db);

    let group = service.create(params("Admins", "ROLE_ADMIN")).await.unwrap();
    assert_eq!(group.name, "Admins");
    assert_eq!(group.role, "ROLE_ADMIN");

    expect_validation(service.create(params("Ghosts", "ROLE_GHOST")).await, "role");
    expect_validation(service.create(params("A", "ROLE_USER")).await, "name");

    Ok(())
}

/// Tests patching only the role and rejecting an incomplete full update.
#[tokio::test]
async fn updates_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_user_group(db, "ROLE_USER").await?;
    let service = UserGroupService::new(db);

    let role_only = UserGroupParams {
        role: Some("ROLE_ADMIN".to_string()),
        ..Default::default()
    };

    expect_validation(
        service.update(group.id, role_only.clone(), WriteMode::Update).await,
        "name",
    );

    let patched = service
        .update(group.id, role_only, WriteMode::Patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(patched.role, "ROLE_ADMIN");
    assert_eq!(patched.name, group.name);

    assert!(service
        .update(Uuid::now_v7(), params("Name", "ROLE_USER"), WriteMode::Update)
        .await
        .unwrap()
        .is_none());

    Ok(())
}

/// Tests that deleting a group removes its memberships but not its users.
#[tokio::test]
async fn delete_cascades_memberships() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_user_group(db, "ROLE_USER").await?;
    let user = factory::create_user(db).await?;
    factory::user::add_user_to_group(db, user.id, group.id).await?;

    let service = UserGroupService::new(db);
    let deleted = service.delete(group.id).await.unwrap();

    assert_eq!(deleted.map(|g| g.id), Some(group.id));
    assert!(service.users(group.id).await.unwrap().is_none());

    let groups = crate::server::data::user::UserRepository::new(db)
        .groups(user.id)
        .await?;
    assert!(groups.is_empty());

    Ok(())
}

/// Tests attaching and detaching users from the group side.
#[tokio::test]
async fn attaches_and_detaches_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_user_group(db, "ROLE_USER").await?;
    let user = factory::create_user(db).await?;
    let service = UserGroupService::new(db);

    let membership = service.attach_user(group.id, user.id).await.unwrap();
    assert!(membership.created);
    assert_eq!(membership.items[0].id, user.id);
    assert_eq!(membership.items[0].user_groups[0].id, group.id);

    assert!(!service.attach_user(group.id, user.id).await.unwrap().created);

    let users = service.users(group.id).await.unwrap().unwrap();
    assert_eq!(users.len(), 1);

    assert!(service.detach_user(group.id, user.id).await.unwrap().is_empty());

    assert!(matches!(
        service.attach_user(Uuid::now_v7(), user.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
