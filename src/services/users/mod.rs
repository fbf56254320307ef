//! User accounts.

mod service;
mod types;

pub use service::{UsersService, UsersServiceImpl};
pub use types::{CreateUserRequest, UpdateUserRequest, User};
