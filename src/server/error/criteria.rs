use thiserror::Error;

/// Rejected list query parameter. Always a client error (400).
#[derive(Error, Debug, PartialEq)]
pub enum CriteriaError {
    #[error("Current 'where' parameter is not valid JSON: {0}")]
    InvalidWhere(String),

    #[error("Current 'order' parameter is not valid: {0}")]
    InvalidOrder(String),

    #[error("Current 'limit' parameter is not a non-negative integer: '{0}'")]
    InvalidLimit(String),

    #[error("Current 'offset' parameter is not a non-negative integer: '{0}'")]
    InvalidOffset(String),

    #[error("Current 'search' parameter is not valid: {0}")]
    InvalidSearch(String),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Value does not fit the column type, e.g. a malformed UUID.
    #[error("Invalid value for column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },
}
