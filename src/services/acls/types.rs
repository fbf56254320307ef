//! Types for the ACLs service.

use serde::{Deserialize, Serialize};

/// A Kafka access control entry
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    /// `Topic`, `Group`, `Cluster`, `TransactionalId` or `DelegationToken`
    pub resource_type: String,
    /// Resource name, `*` for all
    pub resource_name: String,
    /// Principal, e.g. `User:alice`
    pub principal: String,
    /// `Allow` or `Deny`
    pub permission_type: String,
    /// Host the rule applies to, `*` for all
    #[serde(default = "wildcard")]
    pub host: String,
    /// Operation, e.g. `Read`, `Write`, `All`
    pub operation: String,
    /// `LITERAL` or `PREFIXED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
}

fn wildcard() -> String {
    "*".to_string()
}

impl Acl {
    /// An `Allow` rule on any host
    pub fn allow(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        principal: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
            principal: principal.into(),
            permission_type: "Allow".to_string(),
            host: wildcard(),
            operation: operation.into(),
            pattern_type: None,
        }
    }
}
