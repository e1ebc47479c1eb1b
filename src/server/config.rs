use std::{ops::RangeInclusive, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_JWT_TTL_SECONDS: i64 = 3600;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_LOGIN_LOCK_THRESHOLD: u64 = 10;
const DEFAULT_LOG_RETENTION_DAYS: i64 = 180;

pub const JWT_TTL_SECONDS_RANGE: RangeInclusive<i64> = 1..=31_536_000;
pub const LOG_RETENTION_DAYS_RANGE: RangeInclusive<i64> = 0..=36_500;

pub struct Config {
    pub database_url: String,

    /// HS256 signing secret for issued JWTs
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,

    pub bind_address: String,

    /// Number of recorded login failures after which an account is locked
    pub login_lock_threshold: u64,
    /// Age in days after which request and login logs are purged
    pub log_retention_days: i64,

    /// Allowed CORS origin, any origin when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_seconds: within(
                "JWT_TTL_SECONDS",
                parsed_or("JWT_TTL_SECONDS", DEFAULT_JWT_TTL_SECONDS)?,
                JWT_TTL_SECONDS_RANGE,
            )?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            login_lock_threshold: parsed_or("LOGIN_LOCK_THRESHOLD", DEFAULT_LOGIN_LOCK_THRESHOLD)?,
            log_retention_days: within(
                "LOG_RETENTION_DAYS",
                parsed_or("LOG_RETENTION_DAYS", DEFAULT_LOG_RETENTION_DAYS)?,
                LOG_RETENTION_DAYS_RANGE,
            )?,
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.is_empty()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads and parses an optional variable, falling back to `default` when unset.
fn parsed_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

pub fn within(name: &str, value: i64, range: RangeInclusive<i64>) -> Result<i64, ConfigError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name: name.to_string(),
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Configuration used by tests; never reads the environment.
#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-for-jwt".to_string(),
        jwt_ttl_seconds: DEFAULT_JWT_TTL_SECONDS,
        bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        login_lock_threshold: 3,
        log_retention_days: DEFAULT_LOG_RETENTION_DAYS,
        cors_allowed_origin: None,
    }
}
