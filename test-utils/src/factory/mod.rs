//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults, reducing boilerplate in tests.
//! Each entity has a `Factory` struct for customization and a `create_*`
//! convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let (user, plaintext) = factory::helpers::create_authenticated_user(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .email("admin@example.com")
//!     .role("admin")
//!     .activated(true)
//!     .build()
//!     .await?;
//!
//! let token = factory::token::TokenFactory::new(&db, admin.id)
//!     .plaintext("ABCDEFGHIJKLMNOPQRSTUV")
//!     .scope("activation")
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod token;
pub mod user;

pub use token::create_token;
pub use user::create_user;
