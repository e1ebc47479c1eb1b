use super::*;

use crate::server::{
    config::test_config,
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::role::Role,
    service::auth::token,
};

fn headers(authorization: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
    headers
}

/// Creates a user in a group for `role` and returns a bearer header for it.
async fn user_with_role(
    db: &sea_orm::DatabaseConnection,
    role: Role,
) -> Result<(entity::user::Model, HeaderMap), DbErr> {
    let user = factory::create_user(db).await?;
    let group = factory::create_user_group(db, role.as_str()).await?;
    factory::user::add_user_to_group(db, user.id, group.id).await?;

    let jwt = token::create_token(&user, &[role], &test_config()).unwrap();

    Ok((user, headers(&format!("Bearer {}", jwt))))
}

/// Tests that a role granted through the hierarchy passes the guard.
///
/// Expected: root user passes an admin check
#[tokio::test]
async fn grants_inherited_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let (user, headers) = user_with_role(db, Role::Root).await?;

    let principal = AuthGuard::new(db, &config, &headers)
        .require(&[Permission::Role(Role::Admin)])
        .await
        .unwrap();

    assert_eq!(principal.user_id(), Some(user.id));

    Ok(())
}

/// Tests that a missing role is forbidden rather than unauthenticated.
#[tokio::test]
async fn denies_missing_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let (_, headers) = user_with_role(db, Role::User).await?;

    let result = AuthGuard::new(db, &config, &headers)
        .require(&[Permission::Role(Role::Admin)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that a user may access its own resources without the fallback role.
#[tokio::test]
async fn allows_self_or_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let (user, headers) = user_with_role(db, Role::User).await?;
    let other = factory::create_user(db).await?;

    let guard = AuthGuard::new(db, &config, &headers);

    assert!(guard
        .require(&[Permission::SelfOrRole(user.id, Role::Admin)])
        .await
        .is_ok());
    assert!(matches!(
        guard
            .require(&[Permission::SelfOrRole(other.id, Role::Admin)])
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that API keys cannot use user-only endpoints even with the role.
#[tokio::test]
async fn rejects_api_key_for_user_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let api_key = factory::create_api_key(db).await?;
    let headers = headers(&format!("ApiKey {}", api_key.token));

    let guard = AuthGuard::new(db, &config, &headers);

    assert!(guard.require(&[Permission::Role(Role::Logged)]).await.is_ok());
    assert!(matches!(
        guard
            .require(&[Permission::UserOnly, Permission::Role(Role::Logged)])
            .await,
        Err(AppError::AuthErr(AuthError::UserRequired(id))) if id == api_key.id
    ));

    Ok(())
}

/// Tests that a request without an Authorization header is unauthenticated.
#[tokio::test]
async fn requires_credentials() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &config, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingCredentials))
    ));

    Ok(())
}
