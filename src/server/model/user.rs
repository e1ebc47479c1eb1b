//! User domain models and parameters.
//!
//! Plain passwords only exist in `UserParams`; the service hashes them before anything
//! reaches the repository.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::user::{UserDto, UserPayloadDto},
    server::{
        error::validation::ValidationError,
        model::{
            localization::{LANGUAGES, LOCALES},
            rest::WriteMode,
            user_group::UserGroup,
        },
        util::validate::Validator,
    },
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub language: String,
    pub locale: String,
    pub timezone: String,
    pub user_groups: Vec<UserGroup>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The user row; its password hash is dropped
    /// - `groups` - Groups the user belongs to
    pub fn from_entity(entity: entity::user::Model, groups: Vec<entity::user_group::Model>) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            language: entity.language,
            locale: entity.locale,
            timezone: entity.timezone,
            user_groups: groups.into_iter().map(UserGroup::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts domain model to DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            language: self.language,
            locale: self.locale,
            timezone: self.timezone,
            user_groups: self
                .user_groups
                .into_iter()
                .map(UserGroup::into_dto)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields of a user write request, password still in plain text.
#[derive(Debug, Clone, Default)]
pub struct UserParams {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    pub user_groups: Option<Vec<Uuid>>,
}

impl UserParams {
    pub fn from_dto(dto: UserPayloadDto) -> Self {
        Self {
            username: dto.username.map(|v| v.trim().to_string()),
            first_name: dto.first_name.map(|v| v.trim().to_string()),
            last_name: dto.last_name.map(|v| v.trim().to_string()),
            email: dto.email.map(|v| v.trim().to_string()),
            password: dto.password,
            language: dto.language,
            locale: dto.locale,
            timezone: dto.timezone,
            user_groups: dto.user_groups,
        }
    }

    /// The password to store, if the request sets one. Empty means "keep current".
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|password| !password.is_empty())
    }

    /// Checks the rules that need no database access.
    ///
    /// `Create` requires identity fields and a password while language, locale and
    /// timezone fall back to defaults. `Update` requires every field except the password.
    ///
    /// # Arguments
    /// - `mode` - Write mode of the request
    ///
    /// # Returns
    /// - `Ok(())` - Payload is acceptable
    /// - `Err(ValidationError)` - One entry per rejected field
    pub fn validate(&self, mode: WriteMode) -> Result<(), ValidationError> {
        let mut validator = Validator::new(mode);

        validator.required("username", &self.username);
        validator.required("first_name", &self.first_name);
        validator.required("last_name", &self.last_name);
        validator.required("email", &self.email);

        validator.length("username", self.username.as_deref(), 2, 255);
        validator.length("first_name", self.first_name.as_deref(), 2, 255);
        validator.length("last_name", self.last_name.as_deref(), 2, 255);
        validator.email("email", self.email.as_deref());

        match mode {
            WriteMode::Create => {
                if self.new_password().is_none() {
                    validator.add("password", "This value should not be blank.");
                }
            }
            WriteMode::Update => {
                validator.required("language", &self.language);
                validator.required("locale", &self.locale);
                validator.required("timezone", &self.timezone);
            }
            WriteMode::Patch => {}
        }

        if let Some(password) = self.new_password() {
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                validator.add(
                    "password",
                    format!(
                        "This value is too short. It should have {} characters or more.",
                        MIN_PASSWORD_LENGTH
                    ),
                );
            }
        }

        validator.one_of("language", self.language.as_deref(), &LANGUAGES);
        validator.one_of("locale", self.locale.as_deref(), &LOCALES);
        validator.timezone("timezone", self.timezone.as_deref());

        validator.finish()
    }
}

/// Fully resolved values for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub language: String,
    pub locale: String,
    pub timezone: String,
}

/// Column changes for updating a user; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}
