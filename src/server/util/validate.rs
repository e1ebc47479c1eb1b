//! Field validation collecting every failure before reporting.

use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

use crate::server::{
    error::validation::{FieldError, ValidationError},
    model::rest::WriteMode,
};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Expect a valid email regex")
});

const BLANK_MESSAGE: &str = "This value should not be blank.";

/// Accumulates field errors for one request payload.
///
/// Rules that receive `None` are skipped, so optional fields are only checked when present.
/// Missing required fields are only reported when the write mode requires them.
pub struct Validator {
    mode: WriteMode,
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new(mode: WriteMode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    /// Records an arbitrary error for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Field must be present when the write mode requires all fields.
    pub fn required<T>(&mut self, field: &str, value: &Option<T>) {
        if self.mode.requires_all() && value.is_none() {
            self.add(field, BLANK_MESSAGE);
        }
    }

    /// Character count must be within `min..=max`.
    pub fn length(&mut self, field: &str, value: Option<&str>, min: usize, max: usize) {
        let Some(value) = value else {
            return;
        };

        let length = value.chars().count();
        if length < min {
            self.add(
                field,
                format!(
                    "This value is too short. It should have {} characters or more.",
                    min
                ),
            );
        } else if length > max {
            self.add(
                field,
                format!(
                    "This value is too long. It should have {} characters or less.",
                    max
                ),
            );
        }
    }

    pub fn email(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !EMAIL_REGEX.is_match(value) {
                self.add(field, "This value is not a valid email address.");
            }
        }
    }

    pub fn one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str]) {
        if let Some(value) = value {
            if !allowed.contains(&value) {
                self.add(
                    field,
                    format!("The value you selected is not a valid choice: {}", value),
                );
            }
        }
    }

    /// Value must be an IANA timezone identifier.
    pub fn timezone(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if value.parse::<Tz>().is_err() {
                self.add(
                    field,
                    format!("The value you selected is not a valid choice: {}", value),
                );
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}
