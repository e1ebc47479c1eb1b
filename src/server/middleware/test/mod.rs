use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod auth;
