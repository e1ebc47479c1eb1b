use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{ErrorDto, FieldErrorDto};

/// A single rejected field together with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Request payload failed one or more validation rules.
#[derive(Error, Debug)]
#[error("Validation failed: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Validation error for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Whether any error was reported for `field`.
    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Converts validation failures into a 400 Bad Request listing every field error.
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;

        (
            status,
            Json(ErrorDto {
                message: summary(&self.errors),
                code: 0,
                status: status.as_u16(),
                errors: Some(
                    self.errors
                        .into_iter()
                        .map(|e| FieldErrorDto {
                            field: e.field,
                            message: e.message,
                        })
                        .collect(),
                ),
            }),
        )
            .into_response()
    }
}
