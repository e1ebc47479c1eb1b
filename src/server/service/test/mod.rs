use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::error::AppError;

mod api_key;
mod auth;
mod log;
mod user_group;

fn expect_validation(result: Result<impl std::fmt::Debug, AppError>, field: &str) {
    match result {
        Err(AppError::ValidationErr(e)) => assert!(
            e.has_field(field),
            "expected error for '{}', got {:?}",
            field,
            e.errors
        ),
        other => panic!("expected validation error for '{}', got {:?}", field, other),
    }
}
