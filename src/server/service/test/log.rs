use super::*;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use crate::server::{model::log::RequestLogParams, service::log::LogService};

fn request_log() -> RequestLogParams {
    RequestLogParams {
        user_id: None,
        api_key_id: None,
        client_ip: Some("127.0.0.1".to_string()),
        method: "GET".to_string(),
        scheme: "http".to_string(),
        http_host: "localhost".to_string(),
        path: "/user".to_string(),
        query_string: None,
        uri: "/user".to_string(),
        headers: "{}".to_string(),
        content: String::new(),
        status_code: 200,
        response_content_length: 2,
    }
}

/// Inserts a request log row dated `days_ago` days back.
async fn old_request_log(db: &sea_orm::DatabaseConnection, days_ago: i64) -> Result<(), DbErr> {
    let time = Utc::now() - Duration::days(days_ago);
    let params = request_log();

    entity::log_request::ActiveModel {
        id: ActiveValue::Set(Uuid::now_v7()),
        user_id: ActiveValue::Set(None),
        api_key_id: ActiveValue::Set(None),
        client_ip: ActiveValue::Set(params.client_ip),
        method: ActiveValue::Set(params.method),
        scheme: ActiveValue::Set(params.scheme),
        http_host: ActiveValue::Set(params.http_host),
        path: ActiveValue::Set(params.path),
        query_string: ActiveValue::Set(None),
        uri: ActiveValue::Set(params.uri),
        headers: ActiveValue::Set(params.headers),
        content: ActiveValue::Set(params.content),
        status_code: ActiveValue::Set(200),
        response_content_length: ActiveValue::Set(0),
        time: ActiveValue::Set(time),
        date: ActiveValue::Set(time.date_naive()),
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Tests storing a request log row.
#[tokio::test]
async fn records_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    LogService::new(db).record_request(request_log()).await.unwrap();

    let row = entity::prelude::LogRequest::find().one(db).await?.unwrap();
    assert_eq!(row.path, "/user");
    assert_eq!(row.status_code, 200);
    assert_eq!(row.date, Utc::now().date_naive());

    Ok(())
}

/// Tests logging a delete whose API key no longer exists afterwards.
///
/// Expected: the row is stored without the API key reference
#[tokio::test]
async fn records_delete_of_own_api_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let api_key = factory::create_api_key(db).await?;
    entity::prelude::ApiKey::delete_by_id(api_key.id).exec(db).await?;

    let mut params = request_log();
    params.method = "DELETE".to_string();
    params.api_key_id = Some(api_key.id);

    LogService::new(db).record_request(params).await.unwrap();

    let row = entity::prelude::LogRequest::find().one(db).await?.unwrap();
    assert_eq!(row.api_key_id, None);
    assert_eq!(row.method, "DELETE");

    Ok(())
}

/// Tests that cleanup keeps rows inside the retention window.
///
/// Expected: only the 40 day old row is removed with a 30 day retention
#[tokio::test]
async fn cleanup_removes_rows_older_than_retention() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    old_request_log(db, 40).await?;
    old_request_log(db, 10).await?;
    old_request_log(db, 0).await?;

    let result = LogService::new(db).cleanup(30).await.unwrap();

    assert_eq!(result.log_requests, 1);
    assert_eq!(result.log_logins, 0);
    assert_eq!(entity::prelude::LogRequest::find().count(db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn cleanup_rejects_negative_retention() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(matches!(
        LogService::new(db).cleanup(-1).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

#[tokio::test]
async fn cleanup_rejects_out_of_range_retention() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    old_request_log(db, 40).await?;

    assert!(matches!(
        LogService::new(db).cleanup(1_000_000_000).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        LogService::new(db).cleanup(i64::MAX).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(entity::prelude::LogRequest::find().count(db).await?, 1);

    Ok(())
}
