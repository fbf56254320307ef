//! Types for the Policies service.

use serde::{Deserialize, Serialize};

/// A data protection policy
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataPolicy {
    /// Policy id
    pub id: String,
    /// Policy name
    pub name: String,
    /// Categories, e.g. `PII`
    #[serde(default)]
    pub category: Vec<String>,
    /// `HIGH`, `MEDIUM`, `LOW`
    pub impact_type: String,
    /// Obfuscation applied to matching fields, e.g. `First-1`
    pub obfuscation: String,
    /// Field names the policy applies to
    #[serde(default)]
    pub fields: Vec<String>,
    /// Policy revision
    #[serde(default)]
    pub versions: u32,
    /// Last editor
    #[serde(default)]
    pub last_updated_user: Option<String>,
}

/// Request to create or update a policy
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataPolicyRequest {
    /// Policy name
    pub name: String,
    /// Categories
    pub category: Vec<String>,
    /// Impact type, one of [`impact_types`](super::PoliciesService::impact_types)
    pub impact_type: String,
    /// Obfuscation, one of [`obfuscation_types`](super::PoliciesService::obfuscation_types)
    pub obfuscation: String,
    /// Field names the policy applies to
    pub fields: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatedPolicy {
    pub id: String,
}
