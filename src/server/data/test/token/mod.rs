use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::token::TokenRepository,
    error::AppError,
    model::token::{Scope, Token},
};

mod delete;
mod find_by_hash;
