//! Server-side API backend and business logic.
//!
//! This module contains the complete backend implementation: the request-gating
//! pipeline (rate limiter, authentication, authorization guards), the account and
//! token endpoints built on top of it, and the data access behind them. The backend
//! uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Token issuance and validation, account flows
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models, roles, scopes and the request principal
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Rate limiting, authentication and guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Tracing, database, background tasks and shutdown
//! - **Router** (`router`) - Route table and middleware ordering
//!
//! # Request Flow
//!
//! 1. **Rate limiter** spends one permit from the client's bucket or answers 429
//! 2. **Authentication** resolves the bearer token to a principal or answers 401/500
//! 3. **Guards** on the route check authentication, activation, role or permission
//! 4. **Controller** converts the DTO, calls a service, converts the result back
//! 5. **Service** executes business logic over the data layer

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;

#[cfg(test)]
pub mod testing;
