//! Database repository layer.
//!
//! Repositories perform the queries for each table and convert SeaORM entity models
//! into domain models at this boundary. The `store` module adapts them to the
//! `CredentialStore` contract the token service depends on.

pub mod store;
pub mod token;
pub mod user;

#[cfg(test)]
mod test;
