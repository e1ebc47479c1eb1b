use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{CountDto, ErrorDto},
        role::RoleDto,
    },
    server::{
        controller::rest::{criteria, require, CriteriaParams, ResourcePath},
        error::AppError,
        middleware::auth::Permission,
        model::role::{role_names, Role, RoleRecord},
        service::role::RoleService,
        state::AppState,
    },
};

/// Tag for grouping role endpoints in OpenAPI documentation
pub static ROLE_TAG: &str = "role";

fn role_not_found() -> AppError {
    AppError::NotFound("Role not found".to_string())
}

/// List roles.
///
/// Roles are seeded by migrations and cannot be changed through the API.
///
/// # Access Control
/// - `ROLE_ADMIN`
#[utoipa::path(
    get,
    path = "/role",
    tag = ROLE_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Roles matching the criteria", body = Vec<RoleDto>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn find_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let roles = RoleService::new(&state.db).find(&criteria(query)?).await?;

    Ok((
        StatusCode::OK,
        Json(roles.into_iter().map(RoleRecord::into_dto).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/role/count",
    tag = ROLE_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Number of matching roles", body = CountDto),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn count_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let count = RoleService::new(&state.db).count(&criteria(query)?).await?;

    Ok((StatusCode::OK, Json(CountDto { count })))
}

#[utoipa::path(
    get,
    path = "/role/ids",
    tag = ROLE_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Names of matching roles", body = Vec<String>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn role_ids(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let ids = RoleService::new(&state.db).ids(&criteria(query)?).await?;

    Ok((StatusCode::OK, Json(ids)))
}

#[utoipa::path(
    get,
    path = "/role/{role}",
    tag = ROLE_TAG,
    params(("role" = String, Path, description = "Role name, e.g. ROLE_ADMIN")),
    responses(
        (status = 200, description = "The role", body = RoleDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<String>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;
    let role = path.into_inner()?;

    let role = RoleService::new(&state.db)
        .find_by_id(&role)
        .await?
        .ok_or_else(role_not_found)?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// The role and every role it inherits through the hierarchy.
#[utoipa::path(
    get,
    path = "/role/{role}/inherited",
    tag = ROLE_TAG,
    params(("role" = String, Path, description = "Role name, e.g. ROLE_ADMIN")),
    responses(
        (status = 200, description = "Inherited role names", body = Vec<String>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_inherited_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<String>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;
    let role = path.into_inner()?;

    let roles = RoleService::new(&state.db)
        .inherited(&role)
        .await?
        .ok_or_else(role_not_found)?;

    Ok((StatusCode::OK, Json(role_names(&roles))))
}
