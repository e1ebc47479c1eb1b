//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! entity of the application. `rest` holds the generic repository behind the list, count,
//! ids, find-one and delete operations shared by every REST resource; the entity modules
//! add the queries specific to their resource (memberships, lookups by token, log pruning).
//! Repositories take and return SeaORM entity models or parameter models and never
//! DTOs.

pub mod api_key;
pub mod date_dimension;
pub mod healthz;
pub mod log_login;
pub mod log_request;
pub mod rest;
pub mod role;
pub mod user;
pub mod user_group;

#[cfg(test)]
mod test;
