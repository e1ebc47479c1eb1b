use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed into the expected type.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Variable name
        name: String,
        /// The raw value found in the environment
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Environment variable parses but lies outside the accepted range.
    #[error("Value {value} for environment variable {name} must be between {min} and {max}")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },
}
