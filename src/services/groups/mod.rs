//! Groups and their permissions.

mod service;
mod types;

pub use service::{GroupsService, GroupsServiceImpl};
pub use types::{Group, Namespace};
