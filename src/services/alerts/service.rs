//! Alerts service implementation.

use super::types::{Alert, AlertSetting};
use crate::client::RestClient;
use crate::errors::LensesResult;
use crate::transport::{FrameMode, QueryOption};
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;

const ALERTS_PATH: &str = "api/alerts";
const SETTINGS_PATH: &str = "api/alerts/settings";
const ALERTS_STREAM_PATH: &str = "api/sse/alerts";

/// Callback receiving live alerts; returning an error ends the stream
pub type AlertHandler<'a> = &'a mut (dyn FnMut(Alert) -> LensesResult<()> + Send);

/// Alerts service trait for testability
#[async_trait]
pub trait AlertsService: Send + Sync {
    /// Raised alerts, newest first; `page_size` limits the count
    async fn list(&self, page_size: Option<u32>) -> LensesResult<Vec<Alert>>;

    /// All alert settings
    async fn settings(&self) -> LensesResult<Vec<AlertSetting>>;

    /// Enable or disable one alert setting
    async fn set_setting_enabled(&self, id: u32, enabled: bool) -> LensesResult<()>;

    /// Follow alerts as they are raised until the stream or `handler` ends
    async fn stream(&self, handler: AlertHandler<'_>) -> LensesResult<()>;
}

/// Implementation of the Alerts service
pub struct AlertsServiceImpl {
    client: Arc<RestClient>,
}

impl AlertsServiceImpl {
    /// Create a new Alerts service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertsService for AlertsServiceImpl {
    async fn list(&self, page_size: Option<u32>) -> LensesResult<Vec<Alert>> {
        let mut query = QueryOption::new();
        if let Some(size) = page_size {
            query = query.param("pageSize", size);
        }
        self.client.get_json_with(ALERTS_PATH, &[&query]).await
    }

    async fn settings(&self) -> LensesResult<Vec<AlertSetting>> {
        self.client.get_json(SETTINGS_PATH).await
    }

    async fn set_setting_enabled(&self, id: u32, enabled: bool) -> LensesResult<()> {
        let query = QueryOption::new().param("enable", enabled);
        let response = self
            .client
            .execute(
                Method::PUT,
                &format!("{}/{}", SETTINGS_PATH, id),
                None,
                None,
                &[&query],
            )
            .await?;
        self.client.read_body(response).await?;
        Ok(())
    }

    async fn stream(&self, handler: AlertHandler<'_>) -> LensesResult<()> {
        self.client
            .stream(ALERTS_STREAM_PATH, FrameMode::Strict, &[], handler)
            .await
    }
}
