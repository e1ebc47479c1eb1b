use axum::{
    http::{header::HeaderName, HeaderValue},
    middleware, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{api_key, auth, profile, role, user, user_group, utility},
    error::{config::ConfigError, AppError},
    middleware::request_log::log_request,
    state::AppState,
};

/// Header carrying the server version on every response.
pub static API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-api-version");

/// Declares the `bearer` (JWT) and `api_key` security schemes referenced by the handlers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token from `POST /auth/get_token`"))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "API key token sent as `Authorization: ApiKey <token>`",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resource API",
        description = "Users, user groups, roles and API keys behind generic REST operations"
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Token issuing"),
        (name = "profile", description = "The authenticated user"),
        (name = "user", description = "User management"),
        (name = "user_group", description = "User group management"),
        (name = "api_key", description = "API key management"),
        (name = "role", description = "Read only role hierarchy"),
        (name = "utility", description = "Health, version and localization")
    )
)]
pub struct ApiDoc;

/// Registers every handler and collects its OpenAPI path item alongside.
fn api_router() -> (Router<AppState>, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::get_token))
        .routes(routes!(profile::get_profile))
        .routes(routes!(profile::get_profile_roles))
        .routes(routes!(profile::get_profile_groups))
        .routes(routes!(user::find_users, user::create_user))
        .routes(routes!(user::count_users))
        .routes(routes!(user::user_ids))
        .routes(routes!(
            user::get_user,
            user::update_user,
            user::patch_user,
            user::delete_user
        ))
        .routes(routes!(user::get_user_roles))
        .routes(routes!(user::get_user_groups))
        .routes(routes!(user::attach_user_group, user::detach_user_group))
        .routes(routes!(
            user_group::find_user_groups,
            user_group::create_user_group
        ))
        .routes(routes!(user_group::count_user_groups))
        .routes(routes!(user_group::user_group_ids))
        .routes(routes!(
            user_group::get_user_group,
            user_group::update_user_group,
            user_group::patch_user_group,
            user_group::delete_user_group
        ))
        .routes(routes!(user_group::get_user_group_users))
        .routes(routes!(user_group::attach_user, user_group::detach_user))
        .routes(routes!(api_key::find_api_keys, api_key::create_api_key))
        .routes(routes!(api_key::count_api_keys))
        .routes(routes!(api_key::api_key_ids))
        .routes(routes!(
            api_key::get_api_key,
            api_key::update_api_key,
            api_key::patch_api_key,
            api_key::delete_api_key
        ))
        .routes(routes!(role::find_roles))
        .routes(routes!(role::count_roles))
        .routes(routes!(role::role_ids))
        .routes(routes!(role::get_role))
        .routes(routes!(role::get_inherited_roles))
        .routes(routes!(utility::healthz))
        .routes(routes!(utility::version))
        .routes(routes!(utility::languages))
        .routes(routes!(utility::locales))
        .routes(routes!(utility::timezone_list))
        .split_for_parts()
}

/// Builds the complete HTTP application.
///
/// The OpenAPI document is served at `/api/doc/openapi.json` with Swagger UI at
/// `/api/doc`. Layers, outermost first: request tracing, CORS, the `X-API-VERSION` response header
/// and the request log.
///
/// # Arguments
/// - `state` - Shared application state
///
/// # Returns
/// - `Ok(Router)` - Router ready to be served
/// - `Err(AppError::ConfigErr)` - Configured CORS origin is not a valid header value
pub fn router(state: AppState) -> Result<Router, AppError> {
    let (api, openapi) = api_router();
    let cors = cors_layer(&state.config)?;

    Ok(api
        .merge(SwaggerUi::new("/api/doc").url("/api/doc/openapi.json", openapi))
        .layer(middleware::from_fn_with_state(state.clone(), log_request))
        .layer(SetResponseHeaderLayer::overriding(
            API_VERSION_HEADER.clone(),
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// The OpenAPI document without building a router, used to export it.
pub fn openapi() -> utoipa::openapi::OpenApi {
    api_router().1
}

fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([API_VERSION_HEADER.clone()]);

    match &config.cors_allowed_origin {
        Some(origin) => {
            let origin =
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        name: "CORS_ALLOWED_ORIGIN".to_string(),
                        value: origin.clone(),
                        reason: e.to_string(),
                    })?;

            Ok(cors.allow_origin(origin))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}
