//! Request-gating middleware.
//!
//! Every request passes through `rate_limit`, then `authenticate`, then whichever
//! guards its route carries. Any stage may answer the request itself; later stages
//! and the handler then never run.

pub mod auth;
pub mod guard;
pub mod rate_limit;

#[cfg(test)]
mod test;
