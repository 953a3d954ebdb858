use crate::server::{
    data::user::UserRepository,
    error::{internal::InternalError, AppError},
    model::user::{CreateUserParam, Role},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find;
mod update;
