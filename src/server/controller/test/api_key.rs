use super::*;

/// Tests that a created API key authenticates requests with its groups' roles.
#[tokio::test]
async fn created_key_authenticates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, root) = user_with_role(db, Role::Root).await?;
    let admins = factory::create_user_group(db, "ROLE_ADMIN").await?;
    let server = server(db);

    let response = server
        .post("/api_key")
        .add_header("authorization", root.clone())
        .json(&json!({ "description": "Reporting", "user_groups": [admins.id] }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let api_key: Value = response.json();
    let token = api_key["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 40);

    server
        .get("/user")
        .add_header("authorization", format!("ApiKey {}", token))
        .await
        .assert_status_ok();

    server
        .get("/api_key")
        .add_header("authorization", format!("ApiKey {}", token))
        .await
        .assert_status_forbidden();

    let response = server
        .put(&format!("/api_key/{}", api_key["id"].as_str().unwrap()))
        .add_header("authorization", root)
        .json(&json!({ "description": "Renamed", "user_groups": [] }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["token"], token.as_str());
    assert!(updated["user_groups"].as_array().unwrap().is_empty());

    Ok(())
}

/// Tests that API keys cannot use the profile endpoints.
#[tokio::test]
async fn api_key_has_no_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let api_key = factory::create_api_key(db).await?;
    let server = server(db);

    server
        .get("/profile")
        .add_header("authorization", format!("ApiKey {}", api_key.token))
        .await
        .assert_status_unauthorized();

    Ok(())
}
