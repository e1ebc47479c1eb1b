//! SeaORM entity models for the resource API.
//!
//! Every table created by the `migration` crate has a matching module here. Entities
//! carrying `created_at` / `updated_at` columns stamp them in their
//! `ActiveModelBehavior::before_save` hook so callers never set them by hand.

pub mod prelude;

pub mod api_key;
pub mod api_key_has_user_group;
pub mod date_dimension;
pub mod healthz;
pub mod log_login;
pub mod log_login_failure;
pub mod log_request;
pub mod role;
pub mod user;
pub mod user_group;
pub mod user_has_user_group;

mod timestamp;
