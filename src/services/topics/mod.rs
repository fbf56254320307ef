//! Kafka topics.

mod service;
mod types;

pub use service::{TopicsService, TopicsServiceImpl};
pub use types::{CreateTopicRequest, KeyValue, Topic, TopicConfig};
