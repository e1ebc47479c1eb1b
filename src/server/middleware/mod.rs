//! Request guards and middleware.
//!
//! `auth` resolves the caller from the `Authorization` header and enforces role based
//! access inside handlers. `request_log` is an axum middleware writing every request to
//! the request log table.

pub mod auth;
pub mod request_log;

#[cfg(test)]
mod test;
