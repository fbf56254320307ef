//! Types for the Connectors service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Kafka Connect connector
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Connector {
    /// Connector name
    pub name: String,
    /// Connector configuration
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Tasks currently assigned
    #[serde(default)]
    pub tasks: Vec<ConnectorTaskId>,
    /// `source` or `sink`
    #[serde(default, rename = "type")]
    pub connector_type: Option<String>,
}

/// Identity of one connector task
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectorTaskId {
    /// Owning connector
    pub connector: String,
    /// Task number
    pub task: u32,
}

/// Request to create a connector
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateConnectorRequest {
    /// Connector name
    pub name: String,
    /// Connector configuration; must contain `connector.class`
    pub config: BTreeMap<String, String>,
}

impl CreateConnectorRequest {
    /// Create a request with an empty configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: BTreeMap::new(),
        }
    }

    /// Add a configuration entry
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

/// State of a connector or one of its tasks
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectorState {
    /// `RUNNING`, `PAUSED`, `FAILED` or `UNASSIGNED`
    pub state: String,
    /// Worker running it
    #[serde(default)]
    pub worker_id: Option<String>,
}

/// State of one task
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TaskStatus {
    /// Task number
    pub id: u32,
    /// Task state
    pub state: String,
    /// Worker running it
    #[serde(default)]
    pub worker_id: Option<String>,
    /// Stack trace of a failed task
    #[serde(default)]
    pub trace: Option<String>,
}

/// Status of a connector and its tasks
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectorStatus {
    /// Connector name
    pub name: String,
    /// Connector state
    pub connector: ConnectorState,
    /// Task states
    #[serde(default)]
    pub tasks: Vec<TaskStatus>,
}

impl ConnectorStatus {
    /// Whether the connector and every task is running
    pub fn is_running(&self) -> bool {
        self.connector.state == "RUNNING" && self.tasks.iter().all(|t| t.state == "RUNNING")
    }
}

/// An installed connector plugin
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectorPlugin {
    /// Implementation class
    #[serde(rename = "class")]
    pub class_name: String,
    /// `source` or `sink`
    #[serde(default, rename = "type")]
    pub plugin_type: Option<String>,
    /// Plugin version
    #[serde(default)]
    pub version: Option<String>,
}
