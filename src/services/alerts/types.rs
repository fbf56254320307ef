//! Types for the Alerts service.

use crate::types::epoch_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raised alert, listed or received live
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Id of the alert setting that raised it
    pub alert_id: u32,
    /// `INFO`, `LOW`, `MEDIUM`, `HIGH` or `CRITICAL`
    pub level: String,
    /// Setting category, e.g. `Infrastructure`
    #[serde(default)]
    pub category: Option<String>,
    /// Human readable description
    #[serde(default)]
    pub summary: String,
    /// Affected instance (broker, consumer group, ...)
    #[serde(default)]
    pub instance: Option<String>,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Alert {
    /// `timestamp` as a UTC time
    pub fn raised_at(&self) -> Option<DateTime<Utc>> {
        epoch_millis(self.timestamp)
    }
}

/// One alert setting (rule)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertSetting {
    /// Setting id
    pub id: u32,
    /// What the setting watches
    #[serde(default)]
    pub description: String,
    /// Category
    #[serde(default)]
    pub category: Option<String>,
    /// Whether alerts are raised
    #[serde(default)]
    pub enabled: bool,
    /// Whether the setting can be used on this installation
    #[serde(default)]
    pub is_available: bool,
    /// Conditions by id
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
}
