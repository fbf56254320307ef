//! Kafka ACLs.

mod service;
mod types;

pub use service::{AclsService, AclsServiceImpl};
pub use types::Acl;
