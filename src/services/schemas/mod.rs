//! Schema registry subjects, versions and compatibility.

mod service;
mod types;

pub use service::{SchemasService, SchemasServiceImpl};
pub use types::{CompatibilityLevel, Schema, SchemaVersion};
