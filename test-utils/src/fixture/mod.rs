//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. Use them for
//! unit tests of pure logic such as the authorization guards.
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let user = fixture::user::entity();
//! let admin = fixture::user::entity_builder().role("admin").activated(true).build();
//! ```

pub mod user;
