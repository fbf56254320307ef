//! Data protection policies.

mod service;
mod types;

pub use service::{PoliciesService, PoliciesServiceImpl};
pub use types::{DataPolicy, DataPolicyRequest};
