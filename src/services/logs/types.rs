//! Types for the Logs service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the Lenses server log
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
    /// Formatted time
    #[serde(default)]
    pub time: Option<String>,
    /// `INFO`, `WARN`, `ERROR`, ...
    #[serde(default)]
    pub level: String,
    /// Emitting logger
    #[serde(default)]
    pub logger: Option<String>,
    /// Emitting thread
    #[serde(default)]
    pub thread: Option<String>,
    /// Log message
    #[serde(default)]
    pub message: String,
    /// Stack trace of a logged exception
    #[serde(default)]
    pub stacktrace: Option<String>,
}

/// Which server log to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Application log
    Info,
    /// Metrics log
    Metrics,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogKind::Info => f.write_str("INFO"),
            LogKind::Metrics => f.write_str("METRICS"),
        }
    }
}
