use super::*;
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::server::{
    data::log_login::LogLoginRepository,
    model::log::{LoginAttempt, LoginType},
    util::client::ClientInfo,
};

fn attempt(login_type: LoginType, user_id: Option<uuid::Uuid>) -> LoginAttempt {
    LoginAttempt {
        login_type,
        username: "john".to_string(),
        user_id,
        client: ClientInfo {
            ip: Some("127.0.0.1".to_string()),
            agent: Some("test-agent".to_string()),
            host: Some("localhost".to_string()),
        },
    }
}

/// Tests writing a login log row stamped with today's date.
#[tokio::test]
async fn records_login_attempt() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = LogLoginRepository::new(db);
    let row = repo.create(attempt(LoginType::Success, Some(user.id))).await?;

    assert_eq!(row.login_type, "success");
    assert_eq!(row.user_id, Some(user.id));
    assert_eq!(row.client_ip.as_deref(), Some("127.0.0.1"));
    assert_eq!(row.date, row.time.date_naive());

    Ok(())
}

/// Tests counting and clearing the failures of one user only.
#[tokio::test]
async fn counts_and_clears_failures_per_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = LogLoginRepository::new(db);
    repo.create_failure(user.id).await?;
    repo.create_failure(user.id).await?;
    repo.create_failure(other.id).await?;

    assert_eq!(repo.count_failures(user.id).await?, 2);

    assert_eq!(repo.clear_failures(user.id).await?, 2);
    assert_eq!(repo.count_failures(user.id).await?, 0);
    assert_eq!(repo.count_failures(other.id).await?, 1);

    Ok(())
}

/// Tests that only rows dated before the cutoff are deleted.
#[tokio::test]
async fn deletes_rows_before_date() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LogLoginRepository::new(db);
    repo.create(attempt(LoginType::Failure, None)).await?;

    let today = Utc::now().date_naive();

    assert_eq!(repo.delete_before(today).await?, 0);
    assert_eq!(repo.delete_before(today + Duration::days(1)).await?, 1);
    assert_eq!(entity::prelude::LogLogin::find().count(db).await?, 0);

    Ok(())
}
