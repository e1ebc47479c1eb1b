//! Resource API Test Utils
//!
//! Shared testing utilities for the resource API. Provides a builder for test contexts
//! backed by in-memory SQLite databases whose tables are generated straight from the
//! SeaORM entities, plus factories for the identity entities.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_user_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_identity_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let user = factory::user::create_user(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
