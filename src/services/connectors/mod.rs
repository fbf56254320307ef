//! Kafka Connect connectors, proxied through Lenses.

mod service;
mod types;

pub use service::{ConnectorsService, ConnectorsServiceImpl};
pub use types::{
    Connector, ConnectorPlugin, ConnectorState, ConnectorStatus, ConnectorTaskId,
    CreateConnectorRequest, TaskStatus,
};
