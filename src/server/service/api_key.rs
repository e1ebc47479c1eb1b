use rand::Rng;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{
        api_key::ApiKeyRepository,
        rest::{ResolvedCriteria, RestRepository},
        user_group::UserGroupRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        api_key::{ApiKey, ApiKeyParams, API_KEY_TOKEN_LENGTH},
        criteria::Criteria,
        rest::{unique_ids, WriteMode},
    },
};

type ApiKeyEntity = entity::api_key::Entity;

/// Attempts at drawing a token that is not stored yet.
const TOKEN_ATTEMPTS: usize = 5;

pub struct ApiKeyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiKeyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, criteria: &Criteria) -> Result<Vec<ApiKey>, AppError> {
        let criteria = ResolvedCriteria::<ApiKeyEntity>::resolve(criteria)?;
        let api_keys = RestRepository::new(self.db).find(&criteria).await?;

        let ids: Vec<Uuid> = api_keys.iter().map(|api_key| api_key.id).collect();
        let mut groups = ApiKeyRepository::new(self.db)
            .groups_for_api_keys(&ids)
            .await?;

        Ok(api_keys
            .into_iter()
            .map(|api_key| {
                let user_groups = groups.remove(&api_key.id).unwrap_or_default();
                ApiKey::from_entity(api_key, user_groups)
            })
            .collect())
    }

    pub async fn count(&self, criteria: &Criteria) -> Result<u64, AppError> {
        let criteria = ResolvedCriteria::<ApiKeyEntity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).count(&criteria).await?)
    }

    pub async fn ids(&self, criteria: &Criteria) -> Result<Vec<Uuid>, AppError> {
        let criteria = ResolvedCriteria::<ApiKeyEntity>::resolve(criteria)?;

        Ok(RestRepository::new(self.db).ids::<Uuid>(&criteria).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>, AppError> {
        let repo = ApiKeyRepository::new(self.db);

        let Some(api_key) = repo.find_by_id(id).await? else {
            return Ok(None);
        };
        let groups = repo.groups(id).await?;

        Ok(Some(ApiKey::from_entity(api_key, groups)))
    }

    /// Creates an API key with a freshly generated token.
    ///
    /// # Returns
    /// - `Ok(ApiKey)` - Created key including its token
    /// - `Err(AppError::ValidationErr)` - Missing description or unknown groups
    pub async fn create(&self, params: ApiKeyParams) -> Result<ApiKey, AppError> {
        self.validate(&params, WriteMode::Create).await?;

        let repo = ApiKeyRepository::new(self.db);
        let token = self.unique_token().await?;
        let user_groups = unique_ids(params.user_groups.as_deref().unwrap_or_default());

        let created = repo
            .create(token, params.description.unwrap_or_default(), &user_groups)
            .await?;
        let groups = repo.groups(created.id).await?;

        tracing::info!("Created API key {}", created.id);

        Ok(ApiKey::from_entity(created, groups))
    }

    /// Replaces (`Update`) or patches (`Patch`) an API key. The token is kept.
    ///
    /// # Returns
    /// - `Ok(Some(ApiKey))` - Updated key
    /// - `Ok(None)` - No API key with that id
    pub async fn update(
        &self,
        id: Uuid,
        params: ApiKeyParams,
        mode: WriteMode,
    ) -> Result<Option<ApiKey>, AppError> {
        let repo = ApiKeyRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        self.validate(&params, mode).await?;

        let user_groups = params.user_groups.as_deref().map(unique_ids);

        let Some(updated) = repo
            .update(id, params.description, user_groups.as_deref())
            .await?
        else {
            return Ok(None);
        };
        let groups = repo.groups(id).await?;

        Ok(Some(ApiKey::from_entity(updated, groups)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<ApiKey>, AppError> {
        let groups = ApiKeyRepository::new(self.db).groups(id).await?;
        let deleted = RestRepository::<ApiKeyEntity>::new(self.db)
            .delete_by_id(id)
            .await?;

        if let Some(api_key) = &deleted {
            tracing::info!("Deleted API key {}", api_key.id);
        }

        Ok(deleted.map(|api_key| ApiKey::from_entity(api_key, groups)))
    }

    /// Draws random tokens until one is not in use.
    async fn unique_token(&self) -> Result<String, AppError> {
        let repo = ApiKeyRepository::new(self.db);

        for _ in 0..TOKEN_ATTEMPTS {
            let token = generate_token();

            if !repo.token_exists(&token).await? {
                return Ok(token);
            }
        }

        Err(AppError::InternalError(
            "Unable to generate a unique API key token".to_string(),
        ))
    }

    async fn validate(&self, params: &ApiKeyParams, mode: WriteMode) -> Result<(), AppError> {
        let mut errors = match params.validate(mode) {
            Ok(()) => Vec::new(),
            Err(e) => e.errors,
        };

        if let Some(user_groups) = &params.user_groups {
            let wanted = unique_ids(user_groups);
            let existing = UserGroupRepository::new(self.db)
                .count_existing(&wanted)
                .await?;

            if existing != wanted.len() as u64 {
                errors.extend(
                    ValidationError::field("user_groups", "One or more user groups do not exist.")
                        .errors,
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors }.into())
        }
    }
}

/// Random alphanumeric token of `API_KEY_TOKEN_LENGTH` characters.
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..API_KEY_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_is_alphanumeric_with_fixed_length() {
        let token = generate_token();

        assert_eq!(token.len(), API_KEY_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }
}
