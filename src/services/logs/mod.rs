//! Server log history and live tailing.

mod service;
mod types;

pub use service::{LogHandler, LogsService, LogsServiceImpl};
pub use types::{LogKind, LogLine};
