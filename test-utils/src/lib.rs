//! Car Market Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the car
//! market API. This crate offers a builder pattern for creating test contexts with in-memory
//! SQLite databases, factories that insert rows with sensible defaults, and fixtures that
//! build entity models without touching the database.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Insert users and tokens with defaults
//! - **fixture**: In-memory entity models for unit tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_user_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_user_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
