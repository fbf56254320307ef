//! Types for the Schemas service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered schema version
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Schema {
    /// Subject the schema is registered under
    pub subject: String,
    /// Version within the subject
    pub version: u32,
    /// Registry-wide schema id
    pub id: u32,
    /// The schema text (Avro JSON)
    pub schema: String,
}

/// Version selector for [`get_version`](super::SchemasService::get_version)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// A specific version
    Number(u32),
    /// The most recently registered version
    Latest,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::Number(n) => write!(f, "{}", n),
            SchemaVersion::Latest => f.write_str("latest"),
        }
    }
}

/// Compatibility level enforced by the schema registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityLevel {
    /// No compatibility checks
    None,
    /// New schema can read data written with the previous one
    Backward,
    /// Backward against all previous versions
    BackwardTransitive,
    /// Previous schema can read data written with the new one
    Forward,
    /// Forward against all previous versions
    ForwardTransitive,
    /// Backward and forward
    Full,
    /// Full against all previous versions
    FullTransitive,
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub schema: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct RegisterResponse {
    pub id: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CompatibilityResponse {
    #[serde(alias = "compatibility")]
    pub compatibility_level: CompatibilityLevel,
}

#[derive(Debug, Serialize)]
pub(super) struct CompatibilityRequest {
    pub compatibility: CompatibilityLevel,
}
