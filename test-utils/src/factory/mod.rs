//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let group = factory::user_group::create_user_group(db, "ROLE_ADMIN").await?;
//! let user = factory::user::UserFactory::new(db)
//!     .username("john")
//!     .build()
//!     .await?;
//! factory::user::add_user_to_group(db, user.id, group.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `role` - Seed the built-in roles
//! - `user` - Create users and group memberships
//! - `user_group` - Create user groups
//! - `api_key` - Create API keys and group memberships
//! - `helpers` - Shared counter for unique values

pub mod api_key;
pub mod helpers;
pub mod role;
pub mod user;
pub mod user_group;

pub use api_key::create_api_key;
pub use user::create_user;
pub use user_group::create_user_group;
