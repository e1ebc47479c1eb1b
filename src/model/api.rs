use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ErrorDto {
    pub message: String,
    pub code: i32,
    pub status: u16,
    /// Per-field messages, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorDto>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CountDto {
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct VersionDto {
    pub version: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct HealthzDto {
    pub timestamp: DateTime<Utc>,
}
