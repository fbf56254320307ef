//! Kafka client quotas.

mod service;
mod types;

pub use service::{QuotasService, QuotasServiceImpl};
pub use types::{Quota, QuotaConfig, QuotaTarget};
