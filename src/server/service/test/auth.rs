use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::server::{
    config::test_config,
    error::auth::AuthError,
    model::{principal::Principal, role::Role},
    service::auth::{password::hash_password, token, AuthService},
    util::client::ClientInfo,
};

const PASSWORD: &str = "correct horse battery";

async fn user_with_password(db: &sea_orm::DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    factory::user::UserFactory::new(db)
        .username("john")
        .email("john@example.com")
        .password_hash(hash_password(PASSWORD).unwrap())
        .build()
        .await
}

fn client() -> ClientInfo {
    ClientInfo {
        ip: Some("10.0.0.1".to_string()),
        agent: Some("tests".to_string()),
        host: Some("api.test".to_string()),
    }
}

/// Tests a successful login by username and by email.
///
/// Expected: valid token for the user, success rows in the login log
#[tokio::test]
async fn logs_in_with_username_or_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let user = user_with_password(db).await?;
    let group = factory::create_user_group(db, "ROLE_ADMIN").await?;
    factory::user::add_user_to_group(db, user.id, group.id).await?;

    let service = AuthService::new(db, &config);

    let jwt = service.login("john", PASSWORD, client()).await.unwrap();
    let claims = token::verify_token(&jwt, &config).unwrap();
    assert_eq!(claims.sub, user.id);
    assert!(claims.roles.contains(&"ROLE_ADMIN".to_string()));
    assert!(claims.roles.contains(&"ROLE_LOGGED".to_string()));

    service
        .login("john@example.com", PASSWORD, client())
        .await
        .unwrap();

    let rows = entity::prelude::LogLogin::find().all(db).await?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.login_type == "success"));
    assert!(rows.iter().all(|row| row.client_ip.as_deref() == Some("10.0.0.1")));

    Ok(())
}

/// Tests that a wrong password is logged and counted.
#[tokio::test]
async fn records_failed_login() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let user = user_with_password(db).await?;
    let service = AuthService::new(db, &config);

    let result = service.login("john", "wrong password", client()).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let row = entity::prelude::LogLogin::find().one(db).await?.unwrap();
    assert_eq!(row.login_type, "failure");
    assert_eq!(row.user_id, Some(user.id));
    assert_eq!(entity::prelude::LogLoginFailure::find().count(db).await?, 1);

    Ok(())
}

/// Tests that an unknown username is logged without a user or failure counter.
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let result = service.login("nobody", PASSWORD, client()).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let row = entity::prelude::LogLogin::find().one(db).await?.unwrap();
    assert_eq!(row.username, "nobody");
    assert_eq!(row.user_id, None);
    assert_eq!(entity::prelude::LogLoginFailure::find().count(db).await?, 0);

    Ok(())
}

/// Tests that reaching the failure threshold locks the account even for the right
/// password.
#[tokio::test]
async fn locks_account_after_threshold() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    user_with_password(db).await?;
    let service = AuthService::new(db, &config);

    for _ in 0..config.login_lock_threshold {
        let _ = service.login("john", "wrong password", client()).await;
    }

    let result = service.login("john", PASSWORD, client()).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::LockedAccount(_)))
    ));

    Ok(())
}

/// Tests that a successful login resets the failure counter.
#[tokio::test]
async fn successful_login_clears_failures() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    user_with_password(db).await?;
    let service = AuthService::new(db, &config);

    let _ = service.login("john", "wrong password", client()).await;
    assert_eq!(entity::prelude::LogLoginFailure::find().count(db).await?, 1);

    service.login("john", PASSWORD, client()).await.unwrap();
    assert_eq!(entity::prelude::LogLoginFailure::find().count(db).await?, 0);

    Ok(())
}

/// Tests resolving a bearer token to a user principal.
#[tokio::test]
async fn authenticates_bearer_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let user = factory::create_user(db).await?;
    let jwt = token::create_token(&user, &[Role::Logged], &config).unwrap();

    let principal = AuthService::new(db, &config)
        .authenticate(Some(&format!("Bearer {}", jwt)))
        .await
        .unwrap();

    assert_eq!(principal.user_id(), Some(user.id));
    assert_eq!(principal.roles(), &[Role::Logged]);

    Ok(())
}

/// Tests that a token of a deleted user is rejected.
#[tokio::test]
async fn rejects_token_of_deleted_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let user = factory::create_user(db).await?;
    let jwt = token::create_token(&user, &[Role::Logged], &config).unwrap();
    entity::prelude::User::delete_by_id(user.id).exec(db).await?;

    let result = AuthService::new(db, &config)
        .authenticate(Some(&format!("Bearer {}", jwt)))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(id))) if id == user.id
    ));

    Ok(())
}

/// Tests resolving an API key with its group roles.
#[tokio::test]
async fn authenticates_api_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let api_key = factory::create_api_key(db).await?;
    let group = factory::create_user_group(db, "ROLE_USER").await?;
    factory::api_key::add_api_key_to_group(db, api_key.id, group.id).await?;

    let principal = AuthService::new(db, &config)
        .authenticate(Some(&format!("ApiKey {}", api_key.token)))
        .await
        .unwrap();

    assert!(matches!(principal, Principal::ApiKey { .. }));
    assert_eq!(principal.api_key_id(), Some(api_key.id));
    assert!(principal.has_role(Role::Api));
    assert!(principal.has_role(Role::User));
    assert!(principal.has_role(Role::Logged));
    assert!(!principal.has_role(Role::Admin));

    Ok(())
}

/// Tests the errors for missing and unknown credentials.
#[tokio::test]
async fn rejects_missing_and_unknown_credentials() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);

    assert!(matches!(
        service.authenticate(None).await,
        Err(AppError::AuthErr(AuthError::MissingCredentials))
    ));
    assert!(matches!(
        service.authenticate(Some("Basic abc")).await,
        Err(AppError::AuthErr(AuthError::MissingCredentials))
    ));
    assert!(matches!(
        service.authenticate(Some("ApiKey unknown")).await,
        Err(AppError::AuthErr(AuthError::InvalidApiKey))
    ));
    assert!(matches!(
        service.authenticate(Some("Bearer not.a.jwt")).await,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}
