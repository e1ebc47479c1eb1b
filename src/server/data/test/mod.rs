use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod log_login;
mod migrator;
mod user_group;
