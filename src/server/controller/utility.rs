use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, HealthzDto, VersionDto},
        localization::TimezoneDto,
    },
    server::{
        error::AppError,
        model::localization::{timezones, LANGUAGES, LOCALES},
        service::healthz::HealthzService,
        state::AppState,
    },
};

/// Tag for grouping utility endpoints in OpenAPI documentation
pub static UTILITY_TAG: &str = "utility";

/// Health check that writes to the database.
///
/// Inserts a row into the health check table and prunes rows older than a week.
/// Does not require authentication.
///
/// # Returns
/// - `200 OK` - Timestamp of the check
/// - `500 Internal Server Error` - Database is not writable
#[utoipa::path(
    get,
    path = "/healthz",
    tag = UTILITY_TAG,
    responses(
        (status = 200, description = "Database is reachable and writable", body = HealthzDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn healthz(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let timestamp = HealthzService::new(&state.db).check().await?;

    Ok((StatusCode::OK, Json(HealthzDto { timestamp })))
}

/// Version of the running server.
#[utoipa::path(
    get,
    path = "/version",
    tag = UTILITY_TAG,
    responses(
        (status = 200, description = "Server version", body = VersionDto)
    ),
)]
pub async fn version() -> impl IntoResponse {
    Json(VersionDto {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Supported user interface languages.
#[utoipa::path(
    get,
    path = "/localization/language",
    tag = UTILITY_TAG,
    responses(
        (status = 200, description = "Language codes", body = Vec<String>)
    ),
)]
pub async fn languages() -> impl IntoResponse {
    Json(LANGUAGES.map(str::to_string).to_vec())
}

/// Supported locales.
#[utoipa::path(
    get,
    path = "/localization/locale",
    tag = UTILITY_TAG,
    responses(
        (status = 200, description = "Locale codes", body = Vec<String>)
    ),
)]
pub async fn locales() -> impl IntoResponse {
    Json(LOCALES.map(str::to_string).to_vec())
}

/// Supported timezones.
#[utoipa::path(
    get,
    path = "/localization/timezone",
    tag = UTILITY_TAG,
    responses(
        (status = 200, description = "Timezones grouped by area", body = Vec<TimezoneDto>)
    ),
)]
pub async fn timezone_list() -> impl IntoResponse {
    Json(timezones())
}
