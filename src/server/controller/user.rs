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
        user::{UserDto, UserPayloadDto},
        user_group::UserGroupDto,
    },
    server::{
        controller::rest::{criteria, require, CriteriaParams, ResourcePath},
        error::AppError,
        middleware::auth::Permission,
        model::{
            rest::WriteMode,
            role::{role_names, Role},
            user::{User, UserParams},
            user_group::UserGroup,
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// List users.
///
/// # Access Control
/// - `ROLE_ADMIN`
///
/// # Returns
/// - `200 OK` - Users matching the criteria
/// - `400 Bad Request` - Malformed criteria
/// - `401 Unauthorized` / `403 Forbidden` - Missing credentials or role
#[utoipa::path(
    get,
    path = "/user",
    tag = USER_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Users matching the criteria", body = Vec<UserDto>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn find_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let users = UserService::new(&state.db).find(&criteria(query)?).await?;

    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(User::into_dto).collect::<Vec<_>>()),
    ))
}

/// Count users.
///
/// `order`, `limit` and `offset` are ignored.
#[utoipa::path(
    get,
    path = "/user/count",
    tag = USER_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Number of matching users", body = CountDto),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn count_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let count = UserService::new(&state.db).count(&criteria(query)?).await?;

    Ok((StatusCode::OK, Json(CountDto { count })))
}

/// List ids of users.
#[utoipa::path(
    get,
    path = "/user/ids",
    tag = USER_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Ids of matching users", body = Vec<Uuid>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn user_ids(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let ids = UserService::new(&state.db).ids(&criteria(query)?).await?;

    Ok((StatusCode::OK, Json(ids)))
}

/// Get a user by id.
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;
    let id = path.into_inner()?;

    let user = UserService::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Create a user.
///
/// # Access Control
/// - `ROLE_ROOT`
///
/// # Returns
/// - `201 Created` - The created user
/// - `400 Bad Request` - Invalid fields, or username/email already used
#[utoipa::path(
    post,
    path = "/user",
    tag = USER_TAG,
    request_body = UserPayloadDto,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UserPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;

    let Json(payload) = payload?;
    let user = UserService::new(&state.db)
        .create(UserParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Replace a user. Every field except `password` is required.
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserPayloadDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<UserPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_user(state, headers, path, payload, WriteMode::Update).await
}

/// Update the given fields of a user.
#[utoipa::path(
    patch,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserPayloadDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn patch_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<UserPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_user(state, headers, path, payload, WriteMode::Patch).await
}

async fn write_user(
    state: AppState,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<UserPayloadDto>, JsonRejection>,
    mode: WriteMode,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let Json(payload) = payload?;
    let user = UserService::new(&state.db)
        .update(id, UserParams::from_dto(payload), mode)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete a user.
///
/// A user cannot delete themselves.
///
/// # Returns
/// - `200 OK` - The deleted user
/// - `400 Bad Request` - Caller tried to delete themselves
/// - `404 Not Found` - User not found
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user", body = UserDto),
        (status = 400, description = "Caller tried to delete themselves", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let principal = require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let user = UserService::new(&state.db)
        .delete(&principal, id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Effective roles of a user.
///
/// # Access Control
/// - `ROLE_ADMIN`, or the user themself
#[utoipa::path(
    get,
    path = "/user/{id}/roles",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Role names, hierarchy applied", body = Vec<String>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_user_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let target = path.parsed().copied().unwrap_or_default();
    require(&state, &headers, Permission::SelfOrRole(target, Role::Admin)).await?;
    let id = path.into_inner()?;

    let roles = UserService::new(&state.db)
        .roles(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((StatusCode::OK, Json(role_names(&roles))))
}

/// Groups of a user.
///
/// # Access Control
/// - `ROLE_ADMIN`, or the user themself
#[utoipa::path(
    get,
    path = "/user/{id}/groups",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Groups of the user", body = Vec<UserGroupDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_user_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let target = path.parsed().copied().unwrap_or_default();
    require(&state, &headers, Permission::SelfOrRole(target, Role::Admin)).await?;
    let id = path.into_inner()?;

    let groups = UserService::new(&state.db)
        .groups(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((
        StatusCode::OK,
        Json(groups.into_iter().map(UserGroup::into_dto).collect::<Vec<_>>()),
    ))
}

/// Add a user to a group.
///
/// # Returns
/// - `201 Created` - Membership created, body lists the user's groups
/// - `200 OK` - User already was a member
/// - `404 Not Found` - User or group not found
#[utoipa::path(
    post,
    path = "/user/{id}/group/{user_group_id}",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User id"),
        ("user_group_id" = Uuid, Path, description = "User group id")
    ),
    responses(
        (status = 201, description = "Membership created", body = Vec<UserGroupDto>),
        (status = 200, description = "Already a member", body = Vec<UserGroupDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User or group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn attach_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let (id, user_group_id) = path.into_inner()?;

    let membership = UserService::new(&state.db)
        .attach_group(id, user_group_id)
        .await?;

    let status = if membership.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(
            membership
                .items
                .into_iter()
                .map(UserGroup::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Remove a user from a group.
#[utoipa::path(
    delete,
    path = "/user/{id}/group/{user_group_id}",
    tag = USER_TAG,
    params(
        ("id" = Uuid, Path, description = "User id"),
        ("user_group_id" = Uuid, Path, description = "User group id")
    ),
    responses(
        (status = 200, description = "Remaining groups of the user", body = Vec<UserGroupDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User or group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn detach_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let (id, user_group_id) = path.into_inner()?;

    let groups = UserService::new(&state.db)
        .detach_group(id, user_group_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(groups.into_iter().map(UserGroup::into_dto).collect::<Vec<_>>()),
    ))
}
