use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        auth::{LoginDto, TokenDto},
    },
    server::{
        error::AppError, service::auth::AuthService, state::AppState, util::client::ClientInfo,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Exchange credentials for a JWT.
///
/// Accepts the username or the email address. Each attempt is written to the login
/// log; after too many failed attempts the account is locked.
///
/// # Arguments
/// - `state` - Application state containing the database connection and JWT config
/// - `client` - Client IP, agent and host recorded in the login log
/// - `payload` - Username and password
///
/// # Returns
/// - `200 OK` - Signed token
/// - `400 Bad Request` - Body is not a login document
/// - `401 Unauthorized` - Invalid credentials or locked account
#[utoipa::path(
    post,
    path = "/auth/get_token",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed JWT", body = TokenDto),
        (status = 400, description = "Malformed request body", body = ErrorDto),
        (status = 401, description = "Invalid credentials or locked account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_token(
    State(state): State<AppState>,
    client: ClientInfo,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let token = AuthService::new(&state.db, &state.config)
        .login(&payload.username, &payload.password, client)
        .await?;

    Ok((StatusCode::OK, Json(TokenDto { token })))
}
