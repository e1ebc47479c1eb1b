use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, auth::ProfileDto, user_group::UserGroupDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::{
            principal::Principal,
            role::{role_names, Role},
            user_group::UserGroup,
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping profile endpoints in OpenAPI documentation
pub static PROFILE_TAG: &str = "profile";

/// Resolves the calling user; API keys have no profile.
async fn current_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(entity::user::Model, Vec<Role>), AppError> {
    let principal = AuthGuard::new(&state.db, &state.config, headers)
        .require(&[Permission::UserOnly, Permission::Role(Role::Logged)])
        .await?;

    match principal {
        Principal::User { user, roles } => Ok((user, roles)),
        Principal::ApiKey { api_key, .. } => Err(AuthError::UserRequired(api_key.id).into()),
    }
}

/// Profile of the authenticated user.
///
/// # Returns
/// - `200 OK` - User with groups and effective roles
/// - `401 Unauthorized` - Not authenticated, or authenticated with an API key
#[utoipa::path(
    get,
    path = "/profile",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Profile of the caller", body = ProfileDto),
        (status = 401, description = "Authentication required", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (user, roles) = current_user(&state, &headers).await?;

    let user = UserService::new(&state.db)
        .find_by_id(user.id)
        .await?
        .ok_or(AuthError::UserNotInDatabase(user.id))?;

    Ok((
        StatusCode::OK,
        Json(ProfileDto {
            user: user.into_dto(),
            roles: role_names(&roles),
        }),
    ))
}

/// Effective roles of the authenticated user.
#[utoipa::path(
    get,
    path = "/profile/roles",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Role names, hierarchy applied", body = Vec<String>),
        (status = 401, description = "Authentication required", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_profile_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (_, roles) = current_user(&state, &headers).await?;

    Ok((StatusCode::OK, Json(role_names(&roles))))
}

/// Groups of the authenticated user.
#[utoipa::path(
    get,
    path = "/profile/groups",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Groups of the caller", body = Vec<UserGroupDto>),
        (status = 401, description = "Authentication required", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_profile_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (user, _) = current_user(&state, &headers).await?;

    let groups = UserService::new(&state.db)
        .groups(user.id)
        .await?
        .unwrap_or_default();

    Ok((
        StatusCode::OK,
        Json(groups.into_iter().map(UserGroup::into_dto).collect::<Vec<_>>()),
    ))
}
