//! JWT creation and verification.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::{
    config::{Config, JWT_TTL_SECONDS_RANGE},
    error::{auth::AuthError, config::ConfigError, internal::InternalError, AppError},
    model::role::{role_names, Role},
};

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub sub: Uuid,
    pub username: String,
    /// Effective roles at the time the token was issued
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// Claims valid for `ttl_seconds` from now.
    ///
    /// # Returns
    /// - `Ok(TokenClaims)` - Claims ready for signing
    /// - `Err(ConfigError::OutOfRange)` - Expiry is not a representable time
    pub fn new(
        user: &entity::user::Model,
        roles: &[Role],
        ttl_seconds: i64,
    ) -> Result<Self, ConfigError> {
        let now = Utc::now();
        let exp = TimeDelta::try_seconds(ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| ConfigError::OutOfRange {
                name: "JWT_TTL_SECONDS".to_string(),
                value: ttl_seconds,
                min: *JWT_TTL_SECONDS_RANGE.start(),
                max: *JWT_TTL_SECONDS_RANGE.end(),
            })?;

        Ok(Self {
            sub: user.id,
            username: user.username.clone(),
            roles: role_names(roles),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }
}

/// Signs an HS256 token for a user.
///
/// # Arguments
/// - `user` - Authenticated user
/// - `roles` - Effective roles of the user
/// - `config` - Provides the signing secret and token lifetime
pub fn create_token(
    user: &entity::user::Model,
    roles: &[Role],
    config: &Config,
) -> Result<String, AppError> {
    let claims = TokenClaims::new(user, roles, config.jwt_ttl_seconds)?;
    encode_claims(&claims, config)
}

pub fn encode_claims(claims: &TokenClaims, config: &Config) -> Result<String, AppError> {
    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());

    Ok(encode(&Header::default(), claims, &key).map_err(InternalError::from)?)
}

/// Verifies signature and expiry of a token and returns its claims.
///
/// # Returns
/// - `Ok(TokenClaims)` - Valid token
/// - `Err(AuthError::ExpiredToken)` - Token is past `exp`
/// - `Err(AuthError::InvalidToken)` - Malformed token or bad signature
/// - `Err(InternalError::Token)` - Key or algorithm misconfiguration
pub fn verify_token(token: &str, config: &Config) -> Result<TokenClaims, AppError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let data = decode::<TokenClaims>(token, &key, &Validation::default()).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::from(AuthError::ExpiredToken),
            ErrorKind::InvalidEcdsaKey
            | ErrorKind::InvalidRsaKey(_)
            | ErrorKind::RsaFailedSigning
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat
            | ErrorKind::MissingAlgorithm
            | ErrorKind::Crypto(_) => AppError::from(InternalError::from(e)),
            _ => AppError::from(AuthError::InvalidToken(e.to_string())),
        }
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::test_config;

    fn user() -> entity::user::Model {
        let now = Utc::now();
        entity::user::Model {
            id: Uuid::now_v7(),
            username: "john".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            password: String::new(),
            language: "en".to_string(),
            locale: "en".to_string(),
            timezone: "Europe/Helsinki".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn round_trips_claims() {
        let config = test_config();
        let user = user();

        let token = create_token(&user, &[Role::User, Role::Logged], &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "john");
        assert_eq!(claims.roles, vec!["ROLE_USER", "ROLE_LOGGED"]);
        assert_eq!(claims.exp - claims.iat, config.jwt_ttl_seconds);
    }

    #[test]
    fn rejects_expired_token() {
        let config = test_config();
        let mut claims =
            TokenClaims::new(&user(), &[Role::Logged], config.jwt_ttl_seconds).unwrap();
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;

        let token = encode_claims(&claims, &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(AppError::AuthErr(AuthError::ExpiredToken))
        ));
    }

    #[test]
    fn rejects_unrepresentable_ttl() {
        let mut config = test_config();
        config.jwt_ttl_seconds = i64::MAX;

        assert!(matches!(
            create_token(&user(), &[Role::Logged], &config),
            Err(AppError::ConfigErr(ConfigError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();

        let token = create_token(&user(), &[Role::Logged], &other).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(AppError::AuthErr(AuthError::InvalidToken(_)))
        ));
    }

    #[test]
    fn rejects_garbage() {
        let config = test_config();

        assert!(matches!(
            verify_token("not.a.jwt", &config),
            Err(AppError::AuthErr(AuthError::InvalidToken(_)))
        ));
    }
}
