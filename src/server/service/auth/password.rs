//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a plain password with argon2id and a random salt.
///
/// # Returns
/// - `Ok(String)` - PHC formatted hash suitable for the `user.password` column
/// - `Err(AppError::InternalErr)` - Hashing failed
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a plain password against a stored hash.
///
/// A stored value that is not a valid PHC hash never matches. Verification uses the
/// parameters embedded in the hash itself.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Runs `hash_password` on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(InternalError::from)?
}

/// Runs `verify_password` on the blocking thread pool.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    Ok(tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(InternalError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let first = hash_password("password123").unwrap();
        let second = hash_password("password123").unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn blocking_variants_agree() {
        let hash = hash_password_blocking("password123".to_string()).await.unwrap();

        assert!(verify_password_blocking("password123".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("password124".to_string(), hash)
            .await
            .unwrap());
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-password-hash"));
    }
}
