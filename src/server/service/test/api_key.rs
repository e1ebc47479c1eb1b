use super::*;
use uuid::Uuid;

use crate::server::{
    model::{
        api_key::{ApiKeyParams, API_KEY_TOKEN_LENGTH},
        rest::WriteMode,
    },
    service::api_key::ApiKeyService,
};

/// Tests that create generates a token and attaches groups.
#[tokio::test]
async fn creates_api_key_with_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_user_group(db, "ROLE_USER").await?;

    let api_key = ApiKeyService::new(db)
        .create(ApiKeyParams {
            description: Some("Importer".to_string()),
            user_groups: Some(vec![group.id]),
        })
        .await
        .unwrap();

    assert_eq!(api_key.token.len(), API_KEY_TOKEN_LENGTH);
    assert!(api_key.token.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(api_key.user_groups.len(), 1);

    Ok(())
}

/// Tests validation of description and groups.
#[tokio::test]
async fn validates_api_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ApiKeyService::new(db);

    expect_validation(service.create(ApiKeyParams::default()).await, "description");
    expect_validation(
        service
            .create(ApiKeyParams {
                description: Some("Importer".to_string()),
                user_groups: Some(vec![Uuid::now_v7()]),
            })
            .await,
        "user_groups",
    );

    Ok(())
}

/// Tests that update keeps the token and replaces groups.
#[tokio::test]
async fn update_keeps_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let api_key = factory::create_api_key(db).await?;
    let group = factory::create_user_group(db, "ROLE_ADMIN").await?;

    let updated = ApiKeyService::new(db)
        .update(
            api_key.id,
            ApiKeyParams {
                description: Some("Renamed".to_string()),
                user_groups: Some(vec![group.id]),
            },
            WriteMode::Update,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.token, api_key.token);
    assert_eq!(updated.description, "Renamed");
    assert_eq!(updated.user_groups[0].id, group.id);

    Ok(())
}

/// Tests that list results carry groups and delete returns the removed key.
#[tokio::test]
async fn finds_and_deletes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let api_key = factory::create_api_key(db).await?;
    let group = factory::create_user_group(db, "ROLE_USER").await?;
    factory::api_key::add_api_key_to_group(db, api_key.id, group.id).await?;

    let service = ApiKeyService::new(db);

    let found = service.find(&Default::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].user_groups.len(), 1);

    let deleted = service.delete(api_key.id).await.unwrap();
    assert_eq!(deleted.map(|k| k.id), Some(api_key.id));
    assert_eq!(service.count(&Default::default()).await.unwrap(), 0);

    Ok(())
}
