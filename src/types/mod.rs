//! Types shared across the client.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The logged in user, as returned by the session endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login name
    pub user: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Permissions granted through the user's groups
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Whether the user may delete schemas
    #[serde(default)]
    pub schema_registry_delete: bool,
}

impl UserProfile {
    /// Whether the user holds `permission`
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Convert an epoch-milliseconds timestamp, as the server reports it
pub fn epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
