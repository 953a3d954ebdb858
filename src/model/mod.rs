//! Request and response DTOs shared by the HTTP layer.

pub mod api;
pub mod token;
pub mod user;
