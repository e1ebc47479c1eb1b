use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization` header, or one with an unknown scheme.
    #[error("Request is missing credentials")]
    MissingCredentials,

    /// Bearer token failed signature, format or claim validation.
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    /// Bearer token is well formed but past its `exp` claim.
    #[error("Expired JWT token")]
    ExpiredToken,

    /// Token subject does not exist anymore, e.g. the user was deleted after login.
    #[error("User {0} referenced by token not found in database")]
    UserNotInDatabase(Uuid),

    /// No API key matches the presented token.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Username/password pair did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User reached the login failure threshold.
    #[error("User {0} account is locked")]
    LockedAccount(Uuid),

    /// Endpoint only serves users but the caller authenticated with an API key.
    #[error("API key {0} attempted to access a user-only endpoint")]
    UserRequired(Uuid),

    /// Caller is authenticated but lacks the required role.
    ///
    /// # Fields
    /// - Identifier of the principal
    /// - Reason logged server-side
    #[error("Access denied for {0}: {1}")]
    AccessDenied(String, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingCredentials` / `InvalidToken` / `ExpiredToken` / `UserNotInDatabase` /
///   `InvalidApiKey` / `InvalidCredentials` / `UserRequired` → 401 Unauthorized
/// - `LockedAccount` → 401 Unauthorized with "Locked account."
/// - `AccessDenied` → 403 Forbidden
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Authentication required.")
            }
            Self::InvalidToken(_) => error_response(StatusCode::UNAUTHORIZED, "Invalid JWT Token"),
            Self::ExpiredToken => error_response(StatusCode::UNAUTHORIZED, "Expired JWT Token"),
            Self::UserNotInDatabase(_) | Self::InvalidApiKey | Self::UserRequired(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid credentials.")
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid credentials.")
            }
            Self::LockedAccount(_) => error_response(StatusCode::UNAUTHORIZED, "Locked account."),
            Self::AccessDenied(_, _) => error_response(StatusCode::FORBIDDEN, "Access denied."),
        }
    }
}
