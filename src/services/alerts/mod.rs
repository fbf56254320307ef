//! Alerts, alert settings and the live alert feed.

mod service;
mod types;

pub use service::{AlertHandler, AlertsService, AlertsServiceImpl};
pub use types::{Alert, AlertSetting};
