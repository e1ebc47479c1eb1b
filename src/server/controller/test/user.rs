use super::*;
use uuid::Uuid;

fn new_user(username: &str) -> Value {
    json!({
        "username": username,
        "first_name": "John",
        "last_name": "Doe",
        "email": format!("{}@example.com", username),
        "password": "password123",
    })
}

/// Tests the create, read, update and delete cycle as root.
#[tokio::test]
async fn crud_cycle_as_root() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, root) = user_with_role(db, Role::Root).await?;
    let server = server(db);

    let response = server
        .post("/user")
        .add_header("authorization", root.clone())
        .json(&new_user("john"))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["username"], "john");
    assert_eq!(created["language"], "en");
    assert!(created.get("password").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let response = server
        .get(&format!("/user/{}", id))
        .add_header("authorization", root.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], "john@example.com");

    let response = server
        .patch(&format!("/user/{}", id))
        .add_header("authorization", root.clone())
        .json(&json!({ "first_name": "Johnny" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["first_name"], "Johnny");

    let response = server
        .put(&format!("/user/{}", id))
        .add_header("authorization", root.clone())
        .json(&json!({ "first_name": "Johnny" }))
        .await;
    response.assert_status_bad_request();

    let response = server
        .delete(&format!("/user/{}", id))
        .add_header("authorization", root.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], id.as_str());

    let response = server
        .get(&format!("/user/{}", id))
        .add_header("authorization", root)
        .await;
    response.assert_status_not_found();

    Ok(())
}

/// Tests that validation errors list the offending fields.
#[tokio::test]
async fn create_reports_field_errors() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (root_user, root) = user_with_role(db, Role::Root).await?;
    let server = server(db);

    let mut payload = new_user(&root_user.username);
    payload["email"] = json!("not-an-email");

    let response = server
        .post("/user")
        .add_header("authorization", root.clone())
        .json(&payload)
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|error| error["field"].as_str())
        .collect();
    assert!(fields.contains(&"username"));
    assert!(fields.contains(&"email"));

    let response = server
        .post("/user")
        .add_header("authorization", root)
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status_bad_request();

    Ok(())
}

/// Tests the 401 and 403 responses of the user resource.
#[tokio::test]
async fn enforces_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, admin) = user_with_role(db, Role::Admin).await?;
    let server = server(db);

    let response = server.get("/user").await;
    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["status"], 401);

    server
        .get("/user")
        .add_header("authorization", admin.clone())
        .await
        .assert_status_ok();

    server
        .post("/user")
        .add_header("authorization", admin)
        .json(&new_user("john"))
        .await
        .assert_status_forbidden();

    Ok(())
}

/// Tests criteria on list, count and ids endpoints.
#[tokio::test]
async fn applies_criteria() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin_user, admin) = user_with_role(db, Role::Admin).await?;
    let alice = factory::user::UserFactory::new(db).username("alice").build().await?;
    factory::user::UserFactory::new(db).username("bob").build().await?;
    let server = server(db);

    let response = server
        .get("/user")
        .add_header("authorization", admin.clone())
        .add_query_param("where", r#"{"username": "alice"}"#)
        .await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], alice.id.to_string());

    let response = server
        .get("/user/count")
        .add_header("authorization", admin.clone())
        .add_query_param("limit", "1")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "count": 3 }));

    let response = server
        .get("/user/ids")
        .add_header("authorization", admin.clone())
        .add_query_param("search", "alice bob")
        .await;
    response.assert_status_ok();
    let ids: Vec<Uuid> = response.json();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&admin_user.id));

    server
        .get("/user")
        .add_header("authorization", admin.clone())
        .add_query_param("order", "shoe_size")
        .await
        .assert_status_bad_request();

    server
        .get("/user")
        .add_header("authorization", admin.clone())
        .add_query_param("limit", "-1")
        .await
        .assert_status_bad_request();

    server
        .get("/user/not-a-uuid")
        .add_header("authorization", admin)
        .await
        .assert_status_not_found();

    Ok(())
}

/// Tests that a malformed id is only reported after authorization.
///
/// Expected: 401 without credentials, 403 without the role, 404 with it
#[tokio::test]
async fn malformed_id_is_checked_after_authorization() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, user) = user_with_role(db, Role::User).await?;
    let (_, root) = user_with_role(db, Role::Root).await?;
    let server = server(db);

    server
        .get("/user/not-a-uuid")
        .await
        .assert_status_unauthorized();
    server
        .delete("/user/not-a-uuid")
        .add_header("authorization", user.clone())
        .await
        .assert_status_forbidden();
    server
        .get("/user/not-a-uuid/roles")
        .add_header("authorization", user)
        .await
        .assert_status_forbidden();
    server
        .patch("/user/not-a-uuid")
        .add_header("authorization", root)
        .json(&json!({ "first_name": "Nobody" }))
        .await
        .assert_status_not_found();

    Ok(())
}

/// Tests that a user can read its own roles and groups but not those of others.
#[tokio::test]
async fn own_roles_and_groups() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, bearer) = user_with_role(db, Role::User).await?;
    let other = factory::create_user(db).await?;
    let server = server(db);

    let response = server
        .get(&format!("/user/{}/roles", user.id))
        .add_header("authorization", bearer.clone())
        .await;
    response.assert_status_ok();
    let roles: Vec<String> = response.json();
    assert!(roles.contains(&"ROLE_USER".to_string()));
    assert!(roles.contains(&"ROLE_LOGGED".to_string()));

    let response = server
        .get(&format!("/user/{}/groups", user.id))
        .add_header("authorization", bearer.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 1);

    server
        .get(&format!("/user/{}/roles", other.id))
        .add_header("authorization", bearer)
        .await
        .assert_status_forbidden();

    Ok(())
}

/// Tests attach returning 201 then 200, and detach returning the remaining groups.
#[tokio::test]
async fn attaches_and_detaches_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, root) = user_with_role(db, Role::Root).await?;
    let user = factory::create_user(db).await?;
    let group = factory::create_user_group(db, "ROLE_USER").await?;
    let server = server(db);
    let path = format!("/user/{}/group/{}", user.id, group.id);

    let response = server
        .post(&path)
        .add_header("authorization", root.clone())
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Vec<Value>>().len(), 1);

    server
        .post(&path)
        .add_header("authorization", root.clone())
        .await
        .assert_status_ok();

    let response = server
        .delete(&path)
        .add_header("authorization", root.clone())
        .await;
    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());

    server
        .post(&format!("/user/{}/group/{}", user.id, Uuid::now_v7()))
        .add_header("authorization", root)
        .await
        .assert_status_not_found();

    Ok(())
}

/// Tests that root cannot delete its own account.
#[tokio::test]
async fn cannot_delete_self() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (root_user, root) = user_with_role(db, Role::Root).await?;
    let server = server(db);

    let response = server
        .delete(&format!("/user/{}", root_user.id))
        .add_header("authorization", root)
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["message"],
        "You cannot remove yourself..."
    );

    Ok(())
}
