//! Types for the Audits service.

use crate::types::epoch_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One audit log entry
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Audited resource type, e.g. `TOPIC`, `CONNECTOR`, `USER`
    #[serde(rename = "type")]
    pub entry_type: String,
    /// `ADD`, `REMOVE`, `UPDATE`, ...
    pub change: String,
    /// Who made the change
    #[serde(default)]
    pub user_id: String,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
    /// Change details
    #[serde(default)]
    pub content: BTreeMap<String, String>,
}

impl AuditEntry {
    /// `timestamp` as a UTC time
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        epoch_millis(self.timestamp)
    }
}
