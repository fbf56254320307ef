//! # Lenses Client
//!
//! Asynchronous client for the Lenses data-platform management API.
//!
//! ## Features
//!
//! - Token, basic and Kerberos (SPNEGO) authentication
//! - Typed services for topics, connectors, schemas, ACLs, quotas, alerts,
//!   audits, logs, users, groups and data policies
//! - Transparent gzip decoding of response bodies
//! - Live alert, audit and log feeds over server-sent events
//! - Configuration from the environment or a multi-context file
//!
//! ## Example
//!
//! ```rust,ignore
//! use lenses_client::{ClientConfig, LensesClient};
//! use lenses_client::auth::{Authentication, BasicCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .host("http://localhost:9991")
//!         .authentication(Authentication::Basic(BasicCredentials::new("admin", "admin")))
//!         .build()?;
//!
//!     let client = LensesClient::connect(config, vec![]).await?;
//!     for topic in client.topics().list().await? {
//!         println!("{} ({} partitions)", topic.topic_name, topic.partitions);
//!     }
//!
//!     client
//!         .alerts()
//!         .stream(&mut |alert| {
//!             println!("{}: {}", alert.level, alert.summary);
//!             Ok(())
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod transport;
pub mod types;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod mocks;

pub use auth::{Authentication, Authenticator, SpnegoProvider};
pub use client::{ConnectOption, LensesClient, RestClient};
pub use config::{ClientConfig, ClientConfigBuilder, Contexts};
pub use errors::{LensesError, LensesResult};
pub use observability::{ClientLogger, LoggingConfig};
pub use transport::{FrameMode, HeaderOption, HttpTransport, QueryOption, RequestOption};
pub use types::UserProfile;

/// Header carrying the session token
pub const TOKEN_HEADER: &str = "X-Kafka-Lenses-Token";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: &str = "15s";
