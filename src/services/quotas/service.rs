//! Quotas service implementation.

use super::types::{Quota, QuotaConfig, QuotaTarget, SetQuotaRequest};
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult};
use crate::services::require;
use crate::transport::CONTENT_TYPE_JSON;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::sync::Arc;

/// Quotas service trait for testability
#[async_trait]
pub trait QuotasService: Send + Sync {
    /// All quotas
    async fn list(&self) -> LensesResult<Vec<Quota>>;

    /// Create or update the quota of `target`
    async fn set(&self, target: &QuotaTarget, config: &QuotaConfig) -> LensesResult<()>;

    /// Remove limits (`producer_byte_rate`, ...) from the quota of `target`
    async fn delete(&self, target: &QuotaTarget, properties: &[&str]) -> LensesResult<()>;
}

/// Implementation of the Quotas service
pub struct QuotasServiceImpl {
    client: Arc<RestClient>,
}

impl QuotasServiceImpl {
    /// Create a new Quotas service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

fn validate_target(target: &QuotaTarget) -> LensesResult<()> {
    for (field, value) in target.names() {
        require(field, value)?;
    }
    Ok(())
}

#[async_trait]
impl QuotasService for QuotasServiceImpl {
    async fn list(&self) -> LensesResult<Vec<Quota>> {
        self.client.get_json("api/quotas").await
    }

    async fn set(&self, target: &QuotaTarget, config: &QuotaConfig) -> LensesResult<()> {
        validate_target(target)?;
        if config.is_empty() {
            return Err(LensesError::validation("at least one quota limit is required"));
        }
        self.client
            .send(Method::PUT, &target.path(), Some(&SetQuotaRequest { config }))
            .await
    }

    async fn delete(&self, target: &QuotaTarget, properties: &[&str]) -> LensesResult<()> {
        validate_target(target)?;
        if properties.is_empty() {
            return Err(LensesError::required("properties"));
        }

        let body = Bytes::from(serde_json::to_vec(properties)?);
        let response = self
            .client
            .execute(
                Method::DELETE,
                &target.path(),
                Some(CONTENT_TYPE_JSON),
                Some(body),
                &[],
            )
            .await?;
        self.client.read_body(response).await?;
        Ok(())
    }
}
