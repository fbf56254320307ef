//! Topics service implementation.

use super::types::{CreateTopicRequest, KeyValue, Topic, UpdateConfigsRequest};
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::services::{require, segment};
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;

const TOPICS_PATH: &str = "api/topics";
const TOPIC_CONFIGS_PATH: &str = "api/configs/topics";

/// Topics service trait for testability
#[async_trait]
pub trait TopicsService: Send + Sync {
    /// List all topics
    async fn list(&self) -> LensesResult<Vec<Topic>>;

    /// Get a topic by name
    async fn get(&self, name: &str) -> LensesResult<Topic>;

    /// Create a topic
    async fn create(&self, request: CreateTopicRequest) -> LensesResult<()>;

    /// Replace configuration overrides of a topic
    async fn update_configs(&self, name: &str, configs: Vec<KeyValue>) -> LensesResult<()>;

    /// Delete a topic
    async fn delete(&self, name: &str) -> LensesResult<()>;
}

/// Implementation of the Topics service
pub struct TopicsServiceImpl {
    client: Arc<RestClient>,
}

impl TopicsServiceImpl {
    /// Create a new Topics service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    fn validate_create(request: &CreateTopicRequest) -> LensesResult<()> {
        let mut details = Vec::new();
        if request.topic_name.trim().is_empty() {
            details.push(ValidationDetail::new("topic_name", "must not be empty"));
        }
        if request.partitions == 0 {
            details.push(ValidationDetail::new("partitions", "must be at least 1"));
        }
        if request.replication == 0 {
            details.push(ValidationDetail::new("replication", "must be at least 1"));
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(LensesError::Validation {
                message: "invalid topic".to_string(),
                details,
            })
        }
    }
}

#[async_trait]
impl TopicsService for TopicsServiceImpl {
    async fn list(&self) -> LensesResult<Vec<Topic>> {
        self.client.get_json(TOPICS_PATH).await
    }

    async fn get(&self, name: &str) -> LensesResult<Topic> {
        require("name", name)?;
        self.client
            .get_json(&format!("{}/{}", TOPICS_PATH, segment(name)))
            .await
    }

    async fn create(&self, request: CreateTopicRequest) -> LensesResult<()> {
        Self::validate_create(&request)?;
        self.client
            .send(Method::POST, TOPICS_PATH, Some(&request))
            .await
    }

    async fn update_configs(&self, name: &str, configs: Vec<KeyValue>) -> LensesResult<()> {
        require("name", name)?;
        if configs.is_empty() {
            return Err(LensesError::required("configs"));
        }
        if let Some(kv) = configs.iter().find(|kv| kv.key.trim().is_empty()) {
            return Err(LensesError::Validation {
                message: "config keys must not be empty".to_string(),
                details: vec![ValidationDetail::with_value(
                    "configs",
                    "empty key",
                    kv.value.clone(),
                )],
            });
        }

        let body = UpdateConfigsRequest { configs: &configs };
        self.client
            .send(
                Method::PUT,
                &format!("{}/{}", TOPIC_CONFIGS_PATH, segment(name)),
                Some(&body),
            )
            .await
    }

    async fn delete(&self, name: &str) -> LensesResult<()> {
        require("name", name)?;
        self.client
            .delete(&format!("{}/{}", TOPICS_PATH, segment(name)))
            .await
    }
}
