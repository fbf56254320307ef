//! Audit log and the live audit feed.

mod service;
mod types;

pub use service::{AuditHandler, AuditsService, AuditsServiceImpl};
pub use types::AuditEntry;
