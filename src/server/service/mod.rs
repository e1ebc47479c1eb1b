//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Validation, uniqueness checks, the role hierarchy
//! - **Orchestration**: Coordinating multiple repository calls, e.g. a user with its groups
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//!
//! Every REST resource service exposes the same read operations (`find`, `count`, `ids`,
//! `find_by_id`) driven by a parsed `Criteria`, plus the writes the resource allows.

pub mod api_key;
pub mod auth;
pub mod date_dimension;
pub mod healthz;
pub mod log;
pub mod role;
pub mod user;
pub mod user_group;

#[cfg(test)]
mod test;
