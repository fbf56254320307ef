//! Connectors service implementation.

use super::types::{Connector, ConnectorPlugin, ConnectorStatus, CreateConnectorRequest};
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::resilience::{RetryConfig, RetryExecutor};
use crate::services::{require, segment};
use async_trait::async_trait;
use http::Method;
use std::collections::BTreeMap;
use std::sync::Arc;

const CONNECTOR_CLASS: &str = "connector.class";

/// Connectors service trait for testability.
///
/// Every operation targets one Kafka Connect cluster, by its Lenses name.
#[async_trait]
pub trait ConnectorsService: Send + Sync {
    /// Names of the connectors of a cluster
    async fn list(&self, cluster: &str) -> LensesResult<Vec<String>>;

    /// Get a connector
    async fn get(&self, cluster: &str, name: &str) -> LensesResult<Connector>;

    /// Create a connector
    async fn create(
        &self,
        cluster: &str,
        request: CreateConnectorRequest,
    ) -> LensesResult<Connector>;

    /// Create or replace a connector's configuration
    async fn update_config(
        &self,
        cluster: &str,
        name: &str,
        config: BTreeMap<String, String>,
    ) -> LensesResult<Connector>;

    /// Delete a connector
    async fn delete(&self, cluster: &str, name: &str) -> LensesResult<()>;

    /// Current status of a connector and its tasks
    async fn status(&self, cluster: &str, name: &str) -> LensesResult<ConnectorStatus>;

    /// Pause a connector
    async fn pause(&self, cluster: &str, name: &str) -> LensesResult<()>;

    /// Resume a paused connector
    async fn resume(&self, cluster: &str, name: &str) -> LensesResult<()>;

    /// Restart a connector
    async fn restart(&self, cluster: &str, name: &str) -> LensesResult<()>;

    /// Plugins installed on a cluster
    async fn plugins(&self, cluster: &str) -> LensesResult<Vec<ConnectorPlugin>>;
}

/// Implementation of the Connectors service
pub struct ConnectorsServiceImpl {
    client: Arc<RestClient>,
    retry: Option<RetryExecutor>,
}

impl ConnectorsServiceImpl {
    /// Create a new Connectors service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self {
            client,
            retry: None,
        }
    }

    /// Retry connector writes (create and update) with `config`
    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(RetryExecutor::with_config(config));
        self
    }

    fn connectors_path(cluster: &str) -> String {
        format!("api/proxy-connect/{}/connectors", segment(cluster))
    }

    fn connector_path(cluster: &str, name: &str) -> String {
        format!("{}/{}", Self::connectors_path(cluster), segment(name))
    }

    fn require_ids(cluster: &str, name: &str) -> LensesResult<()> {
        require("cluster", cluster)?;
        require("name", name)
    }

    fn validate_config(config: &BTreeMap<String, String>) -> LensesResult<()> {
        let has_class = config
            .get(CONNECTOR_CLASS)
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false);
        if has_class {
            return Ok(());
        }
        Err(LensesError::Validation {
            message: "connector configuration is incomplete".to_string(),
            details: vec![ValidationDetail::new(CONNECTOR_CLASS, "is required")],
        })
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
    ) -> LensesResult<Connector> {
        match &self.retry {
            Some(retry) => {
                retry
                    .execute(|| self.client.send_json(method.clone(), path, body))
                    .await
            }
            None => self.client.send_json(method, path, body).await,
        }
    }

    async fn action(
        &self,
        method: Method,
        cluster: &str,
        name: &str,
        action: &str,
    ) -> LensesResult<()> {
        Self::require_ids(cluster, name)?;
        let path = format!("{}/{}", Self::connector_path(cluster, name), action);
        self.client.send::<()>(method, &path, None).await
    }
}

#[async_trait]
impl ConnectorsService for ConnectorsServiceImpl {
    async fn list(&self, cluster: &str) -> LensesResult<Vec<String>> {
        require("cluster", cluster)?;
        self.client.get_json(&Self::connectors_path(cluster)).await
    }

    async fn get(&self, cluster: &str, name: &str) -> LensesResult<Connector> {
        Self::require_ids(cluster, name)?;
        self.client
            .get_json(&Self::connector_path(cluster, name))
            .await
    }

    async fn create(
        &self,
        cluster: &str,
        request: CreateConnectorRequest,
    ) -> LensesResult<Connector> {
        Self::require_ids(cluster, &request.name)?;
        Self::validate_config(&request.config)?;

        let body = serde_json::to_value(&request)?;
        self.write(Method::POST, &Self::connectors_path(cluster), &body)
            .await
    }

    async fn update_config(
        &self,
        cluster: &str,
        name: &str,
        config: BTreeMap<String, String>,
    ) -> LensesResult<Connector> {
        Self::require_ids(cluster, name)?;
        Self::validate_config(&config)?;

        let body = serde_json::to_value(&config)?;
        let path = format!("{}/config", Self::connector_path(cluster, name));
        self.write(Method::PUT, &path, &body).await
    }

    async fn delete(&self, cluster: &str, name: &str) -> LensesResult<()> {
        Self::require_ids(cluster, name)?;
        self.client
            .delete(&Self::connector_path(cluster, name))
            .await
    }

    async fn status(&self, cluster: &str, name: &str) -> LensesResult<ConnectorStatus> {
        Self::require_ids(cluster, name)?;
        self.client
            .get_json(&format!("{}/status", Self::connector_path(cluster, name)))
            .await
    }

    async fn pause(&self, cluster: &str, name: &str) -> LensesResult<()> {
        self.action(Method::PUT, cluster, name, "pause").await
    }

    async fn resume(&self, cluster: &str, name: &str) -> LensesResult<()> {
        self.action(Method::PUT, cluster, name, "resume").await
    }

    async fn restart(&self, cluster: &str, name: &str) -> LensesResult<()> {
        self.action(Method::POST, cluster, name, "restart").await
    }

    async fn plugins(&self, cluster: &str) -> LensesResult<Vec<ConnectorPlugin>> {
        require("cluster", cluster)?;
        self.client
            .get_json(&format!(
                "api/proxy-connect/{}/connector-plugins",
                segment(cluster)
            ))
            .await
    }
}
