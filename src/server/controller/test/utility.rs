use super::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::server::router::API_VERSION_HEADER;

/// Tests the unauthenticated utility endpoints.
#[tokio::test]
async fn serves_utility_endpoints() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = server(db);

    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["timestamp"].is_string());

    let response = server.get("/version").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );

    let response = server.get("/localization/language").await;
    assert_eq!(response.json::<Vec<String>>(), vec!["en", "fi"]);

    let response = server.get("/localization/locale").await;
    assert_eq!(response.json::<Vec<String>>(), vec!["en", "fi"]);

    let response = server.get("/localization/timezone").await;
    response.assert_status_ok();
    assert!(response
        .json::<Vec<Value>>()
        .iter()
        .any(|tz| tz["identifier"] == "Europe/Helsinki"));

    Ok(())
}

/// Tests that every response, errors included, carries the API version header.
#[tokio::test]
async fn adds_version_header() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = server(db);

    let ok = server.get("/version").await;
    assert_eq!(ok.header(API_VERSION_HEADER.clone()), env!("CARGO_PKG_VERSION"));

    let unauthorized = server.get("/user").await;
    unauthorized.assert_status_unauthorized();
    assert_eq!(
        unauthorized.header(API_VERSION_HEADER.clone()),
        env!("CARGO_PKG_VERSION")
    );

    Ok(())
}

/// Tests that requests are logged with masked secrets and probes are skipped.
#[tokio::test]
async fn logs_requests_with_masked_secrets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, bearer) = user_with_role(db, Role::User).await?;
    let server = server(db);

    server.get("/healthz").await.assert_status_ok();

    server
        .post("/auth/get_token")
        .json(&json!({ "username": "nobody", "password": "s3cret-value" }))
        .await
        .assert_status_unauthorized();

    server
        .get("/profile")
        .add_header("authorization", bearer)
        .add_query_param("verbose", "1")
        .await
        .assert_status_ok();

    let rows = entity::prelude::LogRequest::find().all(db).await?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.path != "/healthz"));

    let login = entity::prelude::LogRequest::find()
        .filter(entity::log_request::Column::Path.eq("/auth/get_token"))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(login.method, "POST");
    assert_eq!(login.status_code, 401);
    assert!(!login.content.contains("s3cret-value"));
    assert!(login.content.contains("*** REPLACED ***"));
    assert_eq!(login.user_id, None);

    let profile = entity::prelude::LogRequest::find()
        .filter(entity::log_request::Column::Path.eq("/profile"))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(profile.user_id, Some(user.id));
    assert_eq!(profile.query_string.as_deref(), Some("verbose=1"));
    assert!(!profile.headers.contains("Bearer"));
    assert!(profile.response_content_length > 0);

    Ok(())
}

/// Tests that the OpenAPI document is served and declares both security schemes.
#[tokio::test]
async fn serves_openapi_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = server(db);

    let response = server.get("/api/doc/openapi.json").await;
    response.assert_status_ok();

    let document: Value = response.json();
    assert!(document["paths"]["/user/{id}"].is_object());
    assert!(document["components"]["securitySchemes"]["bearer"].is_object());
    assert!(document["components"]["securitySchemes"]["api_key"].is_object());

    let logged = entity::prelude::LogRequest::find().all(db).await?;
    assert!(logged.is_empty());

    Ok(())
}
