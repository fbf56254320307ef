//! Types for the Topics service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Kafka topic as reported by Lenses
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic name
    pub topic_name: String,
    /// Key serialization format
    #[serde(default)]
    pub key_type: Option<String>,
    /// Value serialization format
    #[serde(default)]
    pub value_type: Option<String>,
    /// Number of partitions
    #[serde(default)]
    pub partitions: u32,
    /// Replication factor
    #[serde(default)]
    pub replication: u32,
    /// Whether this is a Kafka-internal topic
    #[serde(default)]
    pub is_control_topic: bool,
    /// Approximate number of messages
    #[serde(default)]
    pub message_count: Option<u64>,
    /// Per-topic configuration overrides
    #[serde(default)]
    pub configs: Vec<TopicConfig>,
}

/// One configuration entry of a topic
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfig {
    /// Config key, e.g. `cleanup.policy`
    pub config_key: String,
    /// Current value
    #[serde(default)]
    pub value: Option<String>,
    /// Default value
    #[serde(default)]
    pub default_value: Option<String>,
    /// Whether this is an override of the broker default
    #[serde(default)]
    pub is_default: bool,
}

/// Request to create a topic
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    /// Topic name
    pub topic_name: String,
    /// Replication factor
    pub replication: u32,
    /// Number of partitions
    pub partitions: u32,
    /// Configuration overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub configs: BTreeMap<String, String>,
}

impl CreateTopicRequest {
    /// Create a request with no config overrides
    pub fn new(topic_name: impl Into<String>, partitions: u32, replication: u32) -> Self {
        Self {
            topic_name: topic_name.into(),
            replication,
            partitions,
            configs: BTreeMap::new(),
        }
    }

    /// Add a configuration override
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configs.insert(key.into(), value.into());
        self
    }
}

/// Key/value pair used when updating topic configs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeyValue {
    /// Config key
    pub key: String,
    /// New value
    pub value: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateConfigsRequest<'a> {
    pub configs: &'a [KeyValue],
}
