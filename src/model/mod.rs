//! Data transfer objects exchanged over the HTTP API.
//!
//! Every type here is serialized as JSON and documented in the OpenAPI schema. Server-side
//! domain models live in `server::model` and convert into these at the controller boundary.

pub mod api;
pub mod api_key;
pub mod auth;
pub mod localization;
pub mod role;
pub mod user;
pub mod user_group;
