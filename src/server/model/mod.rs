//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Closed enumerations (roles, permissions, token scopes) are parsed here, so any value
//! outside them is rejected where it enters the domain rather than compared later.

pub mod principal;
pub mod token;
pub mod user;
