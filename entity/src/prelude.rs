pub use super::api_key::Entity as ApiKey;
pub use super::api_key_has_user_group::Entity as ApiKeyHasUserGroup;
pub use super::date_dimension::Entity as DateDimension;
pub use super::healthz::Entity as Healthz;
pub use super::log_login::Entity as LogLogin;
pub use super::log_login_failure::Entity as LogLoginFailure;
pub use super::log_request::Entity as LogRequest;
pub use super::role::Entity as Role;
pub use super::user::Entity as User;
pub use super::user_group::Entity as UserGroup;
pub use super::user_has_user_group::Entity as UserHasUserGroup;
