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
        user::UserDto,
        user_group::{UserGroupDto, UserGroupPayloadDto},
    },
    server::{
        controller::rest::{criteria, require, CriteriaParams, ResourcePath},
        error::AppError,
        middleware::auth::Permission,
        model::{
            rest::WriteMode,
            role::Role,
            user::User,
            user_group::{UserGroup, UserGroupParams},
        },
        service::user_group::UserGroupService,
        state::AppState,
    },
};

/// Tag for grouping user group endpoints in OpenAPI documentation
pub static USER_GROUP_TAG: &str = "user_group";

fn user_group_not_found() -> AppError {
    AppError::NotFound("User group not found".to_string())
}

/// List user groups.
///
/// # Access Control
/// - `ROLE_ADMIN`
#[utoipa::path(
    get,
    path = "/user_group",
    tag = USER_GROUP_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "User groups matching the criteria", body = Vec<UserGroupDto>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn find_user_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let groups = UserGroupService::new(&state.db)
        .find(&criteria(query)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(groups.into_iter().map(UserGroup::into_dto).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/user_group/count",
    tag = USER_GROUP_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Number of matching user groups", body = CountDto),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn count_user_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let count = UserGroupService::new(&state.db)
        .count(&criteria(query)?)
        .await?;

    Ok((StatusCode::OK, Json(CountDto { count })))
}

#[utoipa::path(
    get,
    path = "/user_group/ids",
    tag = USER_GROUP_TAG,
    params(CriteriaParams),
    responses(
        (status = 200, description = "Ids of matching user groups", body = Vec<Uuid>),
        (status = 400, description = "Malformed criteria", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn user_group_ids(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;

    let ids = UserGroupService::new(&state.db)
        .ids(&criteria(query)?)
        .await?;

    Ok((StatusCode::OK, Json(ids)))
}

#[utoipa::path(
    get,
    path = "/user_group/{id}",
    tag = USER_GROUP_TAG,
    params(("id" = Uuid, Path, description = "User group id")),
    responses(
        (status = 200, description = "The user group", body = UserGroupDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;
    let id = path.into_inner()?;

    let group = UserGroupService::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(user_group_not_found)?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

/// Create a user group.
///
/// # Access Control
/// - `ROLE_ROOT`
///
/// # Returns
/// - `201 Created` - The created group
/// - `400 Bad Request` - Invalid name or unknown role
#[utoipa::path(
    post,
    path = "/user_group",
    tag = USER_GROUP_TAG,
    request_body = UserGroupPayloadDto,
    responses(
        (status = 201, description = "Created user group", body = UserGroupDto),
        (status = 400, description = "Invalid user group data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn create_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UserGroupPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;

    let Json(payload) = payload?;
    let group = UserGroupService::new(&state.db)
        .create(UserGroupParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(group.into_dto())))
}

#[utoipa::path(
    put,
    path = "/user_group/{id}",
    tag = USER_GROUP_TAG,
    params(("id" = Uuid, Path, description = "User group id")),
    request_body = UserGroupPayloadDto,
    responses(
        (status = 200, description = "Updated user group", body = UserGroupDto),
        (status = 400, description = "Invalid user group data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn update_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<UserGroupPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_user_group(state, headers, path, payload, WriteMode::Update).await
}

#[utoipa::path(
    patch,
    path = "/user_group/{id}",
    tag = USER_GROUP_TAG,
    params(("id" = Uuid, Path, description = "User group id")),
    request_body = UserGroupPayloadDto,
    responses(
        (status = 200, description = "Updated user group", body = UserGroupDto),
        (status = 400, description = "Invalid user group data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn patch_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<UserGroupPayloadDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    write_user_group(state, headers, path, payload, WriteMode::Patch).await
}

async fn write_user_group(
    state: AppState,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
    payload: Result<Json<UserGroupPayloadDto>, JsonRejection>,
    mode: WriteMode,
) -> Result<(StatusCode, Json<UserGroupDto>), AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let Json(payload) = payload?;
    let group = UserGroupService::new(&state.db)
        .update(id, UserGroupParams::from_dto(payload), mode)
        .await?
        .ok_or_else(user_group_not_found)?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

/// Delete a user group. Memberships of users and API keys are removed with it.
#[utoipa::path(
    delete,
    path = "/user_group/{id}",
    tag = USER_GROUP_TAG,
    params(("id" = Uuid, Path, description = "User group id")),
    responses(
        (status = 200, description = "Deleted user group", body = UserGroupDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn delete_user_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let id = path.into_inner()?;

    let group = UserGroupService::new(&state.db)
        .delete(id)
        .await?
        .ok_or_else(user_group_not_found)?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

/// Members of a user group.
#[utoipa::path(
    get,
    path = "/user_group/{id}/users",
    tag = USER_GROUP_TAG,
    params(("id" = Uuid, Path, description = "User group id")),
    responses(
        (status = 200, description = "Members of the group", body = Vec<UserDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn get_user_group_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Admin)).await?;
    let id = path.into_inner()?;

    let users = UserGroupService::new(&state.db)
        .users(id)
        .await?
        .ok_or_else(user_group_not_found)?;

    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(User::into_dto).collect::<Vec<_>>()),
    ))
}

/// Add a user to the group.
///
/// # Returns
/// - `201 Created` - Membership created, body lists the group's members
/// - `200 OK` - User already was a member
#[utoipa::path(
    post,
    path = "/user_group/{id}/user/{user_id}",
    tag = USER_GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "User group id"),
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 201, description = "Membership created", body = Vec<UserDto>),
        (status = 200, description = "Already a member", body = Vec<UserDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group or user not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn attach_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let (id, user_id) = path.into_inner()?;

    let membership = UserGroupService::new(&state.db)
        .attach_user(id, user_id)
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
                .map(User::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Remove a user from the group.
#[utoipa::path(
    delete,
    path = "/user_group/{id}/user/{user_id}",
    tag = USER_GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "User group id"),
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Remaining members of the group", body = Vec<UserDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "User group or user not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("api_key" = []))
)]
pub async fn detach_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: ResourcePath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    require(&state, &headers, Permission::Role(Role::Root)).await?;
    let (id, user_id) = path.into_inner()?;

    let users = UserGroupService::new(&state.db)
        .detach_user(id, user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(User::into_dto).collect::<Vec<_>>()),
    ))
}
