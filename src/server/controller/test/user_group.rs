use super::*;

/// Tests group creation, role validation and membership listing over HTTP.
#[tokio::test]
async fn manages_groups() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, root) = user_with_role(db, Role::Root).await?;
    let member = factory::create_user(db).await?;
    let server = server(db);

    let response = server
        .post("/user_group")
        .add_header("authorization", root.clone())
        .json(&json!({ "name": "Support", "role": "ROLE_USER" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let group: Value = response.json();
    let id = group["id"].as_str().unwrap().to_string();

    server
        .post("/user_group")
        .add_header("authorization", root.clone())
        .json(&json!({ "name": "Ghosts", "role": "ROLE_GHOST" }))
        .await
        .assert_status_bad_request();

    let response = server
        .post(&format!("/user_group/{}/user/{}", id, member.id))
        .add_header("authorization", root.clone())
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server
        .get(&format!("/user_group/{}/users", id))
        .add_header("authorization", root.clone())
        .await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], member.id.to_string());

    let response = server
        .patch(&format!("/user_group/{}", id))
        .add_header("authorization", root.clone())
        .json(&json!({ "role": "ROLE_ADMIN" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["role"], "ROLE_ADMIN");
    assert_eq!(response.json::<Value>()["name"], "Support");

    server
        .delete(&format!("/user_group/{}", id))
        .add_header("authorization", root.clone())
        .await
        .assert_status_ok();

    server
        .get(&format!("/user_group/{}", id))
        .add_header("authorization", root)
        .await
        .assert_status_not_found();

    Ok(())
}

/// Tests that admins can read groups but not write them.
#[tokio::test]
async fn admin_reads_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, admin) = user_with_role(db, Role::Admin).await?;
    let server = server(db);

    let response = server
        .get("/user_group/count")
        .add_header("authorization", admin.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["count"], 1);

    server
        .post("/user_group")
        .add_header("authorization", admin)
        .json(&json!({ "name": "Support", "role": "ROLE_USER" }))
        .await
        .assert_status_forbidden();

    Ok(())
}
