//! SeaORM entity definitions for the car market API.

pub mod prelude;

pub mod token;
pub mod user;
