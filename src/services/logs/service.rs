//! Logs service implementation.

use super::types::{LogKind, LogLine};
use crate::client::RestClient;
use crate::errors::LensesResult;
use crate::transport::FrameMode;
use async_trait::async_trait;
use std::sync::Arc;

const LOGS_STREAM_PATH: &str = "api/sse/logs";

/// Callback receiving tailed log lines; returning an error ends the stream
pub type LogHandler<'a> = &'a mut (dyn FnMut(LogLine) -> LensesResult<()> + Send);

/// Logs service trait for testability
#[async_trait]
pub trait LogsService: Send + Sync {
    /// Recent lines of one server log
    async fn history(&self, kind: LogKind) -> LensesResult<Vec<LogLine>>;

    /// Tail the server log until the stream or `handler` ends.
    ///
    /// Lines that are not `data` frames are skipped.
    async fn tail(&self, handler: LogHandler<'_>) -> LensesResult<()>;
}

/// Implementation of the Logs service
pub struct LogsServiceImpl {
    client: Arc<RestClient>,
}

impl LogsServiceImpl {
    /// Create a new Logs service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogsService for LogsServiceImpl {
    async fn history(&self, kind: LogKind) -> LensesResult<Vec<LogLine>> {
        self.client.get_json(&format!("api/logs/{}", kind)).await
    }

    async fn tail(&self, handler: LogHandler<'_>) -> LensesResult<()> {
        self.client
            .stream(LOGS_STREAM_PATH, FrameMode::Lenient, &[], handler)
            .await
    }
}
