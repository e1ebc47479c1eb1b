use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Argon2 failed to hash or parse a password hash.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// JWT could not be encoded or the signing key is unusable.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to process JWT: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// A task on the blocking thread pool panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    BlockingTask(#[from] tokio::task::JoinError),
}
