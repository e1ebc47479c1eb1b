//! Credential checks: password login, bearer JWTs and API keys.

pub mod password;
pub mod token;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::{api_key::ApiKeyRepository, log_login::LogLoginRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        log::{LoginAttempt, LoginType},
        principal::Principal,
    },
    service::role::RoleService,
    util::client::ClientInfo,
};

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Credentials presented in an `Authorization` header.
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials<'h> {
    Bearer(&'h str),
    ApiKey(&'h str),
}

impl<'h> Credentials<'h> {
    /// Parses `Bearer <jwt>` or `ApiKey <token>`; scheme matching ignores case.
    pub fn parse(header: &'h str) -> Option<Self> {
        let header = header.trim();

        let strip = move |prefix: &str| {
            header
                .get(..prefix.len())
                .filter(|scheme| scheme.eq_ignore_ascii_case(prefix))
                .map(|_| header[prefix.len()..].trim())
                .filter(|value| !value.is_empty())
        };

        strip(BEARER_PREFIX)
            .map(Credentials::Bearer)
            .or_else(|| strip(API_KEY_PREFIX).map(Credentials::ApiKey))
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Exchanges a username (or email) and password for a JWT.
    ///
    /// Every attempt is written to `log_login`. A failed password for an existing user
    /// also counts towards the lock threshold; a successful login resets the count.
    ///
    /// # Arguments
    /// - `username` - Username or email address
    /// - `password` - Plain password
    /// - `client` - Request origin recorded in the login log
    ///
    /// # Returns
    /// - `Ok(String)` - Signed JWT
    /// - `Err(AuthError::InvalidCredentials)` - Unknown user or wrong password
    /// - `Err(AuthError::LockedAccount)` - Too many recorded failures
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client: ClientInfo,
    ) -> Result<String, AppError> {
        let user_repo = UserRepository::new(self.db);
        let log_repo = LogLoginRepository::new(self.db);

        let attempt = |login_type, user_id| LoginAttempt {
            login_type,
            username: username.to_string(),
            user_id,
            client: client.clone(),
        };

        let Some(user) = user_repo.find_by_username_or_email(username).await? else {
            log_repo.create(attempt(LoginType::Failure, None)).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        if log_repo.count_failures(user.id).await? >= self.config.login_lock_threshold {
            log_repo
                .create(attempt(LoginType::Failure, Some(user.id)))
                .await?;
            return Err(AuthError::LockedAccount(user.id).into());
        }

        let valid =
            password::verify_password_blocking(password.to_string(), user.password.clone())
                .await?;

        if !valid {
            log_repo
                .create(attempt(LoginType::Failure, Some(user.id)))
                .await?;
            log_repo.create_failure(user.id).await?;
            return Err(AuthError::InvalidCredentials.into());
        }

        log_repo.clear_failures(user.id).await?;
        log_repo
            .create(attempt(LoginType::Success, Some(user.id)))
            .await?;

        let roles = RoleService::new(self.db).roles_for_user(user.id).await?;

        tracing::info!("User {} logged in", user.id);

        token::create_token(&user, &roles, self.config)
    }

    /// Resolves the caller from an `Authorization` header value.
    ///
    /// Bearer tokens are verified and their user reloaded from the database, so deleted
    /// users and changed group memberships take effect immediately.
    ///
    /// # Returns
    /// - `Ok(Principal)` - Authenticated caller with effective roles
    /// - `Err(AuthError)` - Missing, malformed, expired or unknown credentials
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AppError> {
        let credentials = authorization
            .and_then(Credentials::parse)
            .ok_or(AuthError::MissingCredentials)?;

        let role_service = RoleService::new(self.db);

        match credentials {
            Credentials::Bearer(jwt) => {
                let claims = token::verify_token(jwt, self.config)?;

                let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
                    return Err(AuthError::UserNotInDatabase(claims.sub).into());
                };

                let roles = role_service.roles_for_user(user.id).await?;

                Ok(Principal::User { user, roles })
            }
            Credentials::ApiKey(token) => {
                let Some(api_key) = ApiKeyRepository::new(self.db).find_by_token(token).await?
                else {
                    return Err(AuthError::InvalidApiKey.into());
                };

                let roles = role_service.roles_for_api_key(api_key.id).await?;

                Ok(Principal::ApiKey { api_key, roles })
            }
        }
    }
}
