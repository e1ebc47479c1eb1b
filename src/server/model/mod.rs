//! Server-side domain models and operation parameters.
//!
//! Domain models are built from entity models at the repository boundary (`from_entity`)
//! and converted to DTOs at the controller boundary (`into_dto`). Parameter types carry
//! request data from controllers into services.

pub mod api_key;
pub mod criteria;
pub mod date_dimension;
pub mod localization;
pub mod log;
pub mod principal;
pub mod rest;
pub mod role;
pub mod user;
pub mod user_group;
