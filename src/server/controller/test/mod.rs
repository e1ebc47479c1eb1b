//! HTTP level tests driving the full router, middleware included.

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    config::test_config, model::role::Role, router::router, service::auth::token,
    state::AppState,
};

mod api_key;
mod user;
mod user_group;
mod utility;

fn server(db: &DatabaseConnection) -> TestServer {
    let app = router(AppState::new(db.clone(), test_config())).unwrap();
    TestServer::new(app).unwrap()
}

/// Creates a user whose only group grants `role` and returns it with a bearer header value.
async fn user_with_role(
    db: &DatabaseConnection,
    role: Role,
) -> Result<(entity::user::Model, String), DbErr> {
    let user = factory::create_user(db).await?;
    let group = factory::create_user_group(db, role.as_str()).await?;
    factory::user::add_user_to_group(db, user.id, group.id).await?;

    let jwt = token::create_token(&user, &[role], &test_config()).unwrap();

    Ok((user, format!("Bearer {}", jwt)))
}
