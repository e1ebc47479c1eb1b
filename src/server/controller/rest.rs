//! Extractors and documentation shared by the REST resource controllers.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRequestParts, Path, Query,
    },
    http::{request::Parts, HeaderMap},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use utoipa::IntoParams;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{criteria::Criteria, principal::Principal},
    state::AppState,
};

/// Query parameters accepted by the list, count and ids operations.
///
/// Only used to document the operations; handlers read the raw pairs through
/// `criteria` so that `order[column]=DESC` style keys are kept.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
pub struct CriteriaParams {
    /// JSON object of conditions, e.g. `{"role": ["ROLE_ADMIN", "ROLE_USER"]}`
    #[param(rename = "where")]
    pub filter: Option<String>,
    /// Comma separated columns, `-column` sorts descending. `order[column]=ASC|DESC` also works
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// Words to search for, or `{"and": [...], "or": [...]}`
    pub search: Option<String>,
}

/// Parses the request query into list criteria.
///
/// # Returns
/// - `Ok(Criteria)` - Parsed criteria, empty when no query was given
/// - `Err(AppError::BadRequest)` - Query string could not be decoded
/// - `Err(AppError::CriteriaErr)` - A criteria parameter is malformed
pub fn criteria(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Criteria, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    Ok(Criteria::from_query(&pairs)?)
}

/// `Path` extractor whose parse failure is only reported through `into_inner`.
///
/// Handlers authorize first and then unwrap the path, so an anonymous caller gets 401
/// rather than learning that the identifier was malformed.
pub struct ResourcePath<T>(Result<T, PathRejection>);

impl<T> ResourcePath<T> {
    /// The parsed parameters, if they were well formed.
    pub fn parsed(&self) -> Option<&T> {
        self.0.as_ref().ok()
    }

    /// # Returns
    /// - `Ok(T)` - Parsed path parameters
    /// - `Err(AppError::NotFound)` - Malformed parameters cannot name any resource
    pub fn into_inner(self) -> Result<T, AppError> {
        self.0.map_err(|e| {
            tracing::debug!("Rejected path parameters: {}", e.body_text());
            AppError::NotFound("Not found".to_string())
        })
    }
}

impl<S, T> FromRequestParts<S> for ResourcePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            Path::<T>::from_request_parts(parts, state)
                .await
                .map(|Path(value)| value),
        ))
    }
}

/// Authenticates the request and checks a single permission.
pub async fn require(
    state: &AppState,
    headers: &HeaderMap,
    permission: Permission,
) -> Result<Principal, AppError> {
    AuthGuard::new(&state.db, &state.config, headers)
        .require(&[permission])
        .await
}
