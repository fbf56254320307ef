//! Policies service implementation.

use super::types::{CreatedPolicy, DataPolicy, DataPolicyRequest};
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::services::{require, segment};
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;

const POLICIES_PATH: &str = "api/protection/config/data/policies";
const OBFUSCATION_PATH: &str = "api/protection/static/obfuscation";
const IMPACT_PATH: &str = "api/protection/static/impact";

/// Policies service trait for testability
#[async_trait]
pub trait PoliciesService: Send + Sync {
    /// All policies
    async fn list(&self) -> LensesResult<Vec<DataPolicy>>;

    /// Get a policy by id
    async fn get(&self, id: &str) -> LensesResult<DataPolicy>;

    /// Create a policy, returning its id
    async fn create(&self, request: &DataPolicyRequest) -> LensesResult<String>;

    /// Replace a policy
    async fn update(&self, id: &str, request: &DataPolicyRequest) -> LensesResult<()>;

    /// Delete a policy
    async fn delete(&self, id: &str) -> LensesResult<()>;

    /// Obfuscation methods the server supports
    async fn obfuscation_types(&self) -> LensesResult<Vec<String>>;

    /// Impact levels the server supports
    async fn impact_types(&self) -> LensesResult<Vec<String>>;
}

/// Implementation of the Policies service
pub struct PoliciesServiceImpl {
    client: Arc<RestClient>,
}

impl PoliciesServiceImpl {
    /// Create a new Policies service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    fn policy_path(id: &str) -> String {
        format!("{}/{}", POLICIES_PATH, segment(id))
    }
}

fn validate(request: &DataPolicyRequest) -> LensesResult<()> {
    let mut details = Vec::new();
    if request.name.trim().is_empty() {
        details.push(ValidationDetail::new("name", "must not be empty"));
    }
    if request.impact_type.trim().is_empty() {
        details.push(ValidationDetail::new("impact_type", "must not be empty"));
    }
    if request.obfuscation.trim().is_empty() {
        details.push(ValidationDetail::new("obfuscation", "must not be empty"));
    }
    if request.fields.is_empty() {
        details.push(ValidationDetail::new("fields", "at least one field is required"));
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(LensesError::Validation {
            message: "invalid data policy".to_string(),
            details,
        })
    }
}

#[async_trait]
impl PoliciesService for PoliciesServiceImpl {
    async fn list(&self) -> LensesResult<Vec<DataPolicy>> {
        self.client.get_json(POLICIES_PATH).await
    }

    async fn get(&self, id: &str) -> LensesResult<DataPolicy> {
        require("id", id)?;
        self.client.get_json(&Self::policy_path(id)).await
    }

    async fn create(&self, request: &DataPolicyRequest) -> LensesResult<String> {
        validate(request)?;
        let created: CreatedPolicy = self
            .client
            .send_json(Method::POST, POLICIES_PATH, request)
            .await?;
        Ok(created.id)
    }

    async fn update(&self, id: &str, request: &DataPolicyRequest) -> LensesResult<()> {
        require("id", id)?;
        validate(request)?;
        self.client
            .send(Method::PUT, &Self::policy_path(id), Some(request))
            .await
    }

    async fn delete(&self, id: &str) -> LensesResult<()> {
        require("id", id)?;
        self.client.delete(&Self::policy_path(id)).await
    }

    async fn obfuscation_types(&self) -> LensesResult<Vec<String>> {
        self.client.get_json(OBFUSCATION_PATH).await
    }

    async fn impact_types(&self) -> LensesResult<Vec<String>> {
        self.client.get_json(IMPACT_PATH).await
    }
}
