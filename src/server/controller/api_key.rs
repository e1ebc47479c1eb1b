use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{CountDto, ErrorDto},
        api_key::{ApiKeyDto, ApiKeyPayloadDto},
    },
    server::{
        controller::rest::{criteria, require, CriteriaParams, ResourcePath},
        error::AppError,
        middleware::auth::Permission,
        model::{
            api_key::{ApiKey, ApiKeyParams},
            rest::WriteMode,
            role::Role,
        },
        service::api_key::ApiKeyService,
        state::AppState,
    },
};

/// Tag for grouping API key endpoints in OpenAPI documentation
pub static API_KEY_TAG: &str = "api_key";

fn api_key_not_found() -> AppError {
    AppError::NotFound("API key not found".to_string())
}

/// List API keys.
///
/// Every API key operation requires `ROLE_ROOT`.
#[utoipa::path(
    get,
    path = "/api_key",
    tag = API_KEY_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "API keys matching the criteria", body = Vec<ApiKeyDto>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn find_api_keys(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;

    let api_keys = ApiKeyService::new(&state.db)
        .find(&criteria(query)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(api_keys.into_iter().map(ApiKey::into_dto).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api_key/count",
    tag = API_KEY_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Number of matching API keys", body = CountDto),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn count_api_keys(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;

    let count = ApiKeyService::new(&state.db)
        .count(&criteria(query)?)
        .await?;

    Ok((StatusCode::OK, Json(CountDto { count })))
}

#[utoipa::path(
    get,
    path = "/api_key/ids",
    tag = API_KEY_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Ids of matching API keys", body = Vec<Uuid>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn api_key_ids(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;

    let ids = ApiKeyService::new(&state.db).ids(&criteria(query)?).await?;

    Ok((StatusCode::OK, Json(ids)))
}

#[utoipa::path(
    get,
    path = "/api_key/{id}",
    tag = API_KEY_TAG,
    params(("id" = Uuid, Path, description = "API key id")),
    responses(
        (status = 200, description = "The API key", body = ApiKeyDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "API key not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let api_key = ApiKeyService::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(api_key_not_found)?;

    Ok((StatusCode::OK, Json(api_key.into_dto())))
}

/// Create an API key. The token is generated by the server.
#[utoipa::path(
    post,
    path = "/api_key",
    tag = API_KEY_TAG,
    request_body = ApiKeyPayloadDto,
    responses(
        (status = 201, description = "Created API key", body = ApiKeyDto),
        (status = 400, description = "Invalid API key data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn create_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ApiKeyPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;

    let Json(payload) = payload?;
    let api_key = ApiKeyService::new(&state.db)
        .create(ApiKeyParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(api_key.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api_key/{id}",
    tag = API_KEY_TAG,
    params(("id" = Uuid, Path, description = "API key id")),
    request_body = ApiKeyPayloadDto,
    responses(
        (status = 200, description = "Updated API key", body = ApiKeyDto),
        (status = 400, description = "Invalid API key data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "API key not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn update_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<ApiKeyPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_api_key(state, headers, path, payload, WriteMode::Update).await
}

#[utoipa::path(
    patch,
    path = "/api_key/{id}",
    tag = API_KEY_TAG,
    params(("id" = Uuid, Path, description = "API key id")),
    request_body = ApiKeyPayloadDto,
    responses(
        (status = 200, description = "Updated API key", body = ApiKeyDto),
        (status = 400, description = "Invalid API key data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "API key not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn patch_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<ApiKeyPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_api_key(state, headers, path, payload, WriteMode::Patch).await
}

async fn write_api_key(
    state: AppState,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<ApiKeyPayloadDto>, JsonRejection>,
    mode: WriteMode,
) -> Result<(StatusCode, Json<ApiKeyDto>), AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let Json(payload) = payload?;
    let api_key = ApiKeyService::new(&state.db)
        .update(id, ApiKeyParams::from_dto(payload), mode)
        .await?
        .ok_or_else(api_key_not_found)?;

    Ok((StatusCode::OK, Json(api_key.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api_key/{id}",
    tag = API_KEY_TAG,
    params(("id" = Uuid, Path, description = "API key id")),
    responses(
        (status = 200, description = "Deleted API key", body = ApiKeyDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "API key not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn delete_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let api_key = ApiKeyService::new(&state.db)
        .delete(id)
        .await?
        .ok_or_else(api_key_not_found)?;

    Ok((StatusCode::OK, Json(api_key.into_dto())))
}
