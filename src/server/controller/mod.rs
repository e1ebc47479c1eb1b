//! HTTP request handlers.
//!
//! Each module serves one resource. Handlers authenticate and authorize through
//! `AuthGuard`, convert DTOs into domain parameters, call the matching service and
//! convert the result back into DTOs. All handlers are annotated with `utoipa::path`
//! and registered in `router`, which also builds the OpenAPI document from them.

pub mod api_key;
pub mod auth;
pub mod profile;
pub mod rest;
pub mod role;
pub mod user;
pub mod user_group;
pub mod utility;

#[cfg(test)]
mod test;
