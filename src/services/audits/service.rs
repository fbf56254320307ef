//! Audits service implementation.

use super::types::AuditEntry;
use crate::client::RestClient;
use crate::errors::LensesResult;
use crate::transport::FrameMode;
use async_trait::async_trait;
use std::sync::Arc;

const AUDIT_PATH: &str = "api/audit";
const AUDIT_STREAM_PATH: &str = "api/sse/audit";

/// Callback receiving live audit entries; returning an error ends the stream
pub type AuditHandler<'a> = &'a mut (dyn FnMut(AuditEntry) -> LensesResult<()> + Send);

/// Audits service trait for testability
#[async_trait]
pub trait AuditsService: Send + Sync {
    /// Recorded audit entries
    async fn list(&self) -> LensesResult<Vec<AuditEntry>>;

    /// Follow audit entries as they are recorded until the stream or `handler` ends
    async fn stream(&self, handler: AuditHandler<'_>) -> LensesResult<()>;
}

/// Implementation of the Audits service
pub struct AuditsServiceImpl {
    client: Arc<RestClient>,
}

impl AuditsServiceImpl {
    /// Create a new Audits service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuditsService for AuditsServiceImpl {
    async fn list(&self) -> LensesResult<Vec<AuditEntry>> {
        self.client.get_json(AUDIT_PATH).await
    }

    async fn stream(&self, handler: AuditHandler<'_>) -> LensesResult<()> {
        self.client
            .stream(AUDIT_STREAM_PATH, FrameMode::Strict, &[], handler)
            .await
    }
}
