//! Types for the Groups service.

use serde::{Deserialize, Serialize};

/// Data permissions granted on a set of datasets
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Dataset name patterns, e.g. `orders*`
    pub wildcards: Vec<String>,
    /// Permissions, e.g. `ShowTopic`, `QueryTopic`
    pub permissions: Vec<String>,
    /// Connection (Kafka cluster) the namespace applies to
    #[serde(default)]
    pub connection: Option<String>,
}

/// A Lenses group
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Data permissions
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    /// Application permissions, e.g. `ViewAlerts`
    #[serde(default)]
    pub scoped_permissions: Vec<String>,
    /// Administration permissions, e.g. `ManageUsers`
    #[serde(default)]
    pub admin_permissions: Vec<String>,
    /// Number of users in the group
    #[serde(default, skip_serializing)]
    pub user_accounts: u32,
    /// Number of service accounts in the group
    #[serde(default, skip_serializing)]
    pub service_accounts: u32,
}

impl Group {
    /// A group without permissions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            namespaces: Vec::new(),
            scoped_permissions: Vec::new(),
            admin_permissions: Vec::new(),
            user_accounts: 0,
            service_accounts: 0,
        }
    }
}
