//! HTTP request handlers.
//!
//! Handlers convert DTOs to domain parameters, call a service, and convert the result
//! back. Access control is not done here; routes are wrapped in guards by the router.

pub mod extract;
pub mod health;
pub mod token;
pub mod user;
