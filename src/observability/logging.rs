//! Structured logging for the Lenses client.
//!
//! Verbosity is a property of each [`ClientLogger`], not of the process: a
//! client built in debug mode logs request traces while other clients in the
//! same process stay quiet.

use std::collections::HashMap;
use tracing::{debug, error, info, warn, Level};

/// Log level, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Debug level - request traces and payload diagnostics
    Debug,
    /// Info level - general information
    Info,
    /// Warn level - warnings
    Warn,
    /// Error level - errors
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty printed format for development
    Pretty,
    /// JSON format for production
    Json,
    /// Compact format
    Compact,
}

/// Configuration for logging
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level
    pub level: LogLevel,
    /// Log format
    pub format: LogFormat,
    /// Whether to include target (module path)
    pub include_target: bool,
    /// Whether to redact sensitive information
    pub redact_sensitive: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            include_target: false,
            redact_sensitive: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable target
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Enable or disable sensitive data redaction
    pub fn with_redaction(mut self, redact: bool) -> Self {
        self.redact_sensitive = redact;
        self
    }

    /// Configuration used when a client runs in debug mode
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            include_target: true,
            redact_sensitive: true,
        }
    }
}

/// Logger injected into a client, gating output by its own verbosity
#[derive(Debug, Clone, Default)]
pub struct ClientLogger {
    config: LoggingConfig,
}

impl ClientLogger {
    /// Create a new client logger
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// The logger's configuration
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Raise verbosity to debug, keeping the other settings
    pub fn into_debug(mut self) -> Self {
        self.config.level = LogLevel::Debug;
        self
    }

    /// Whether messages at `level` are emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.config.level
    }

    /// Whether this logger runs at debug verbosity
    pub fn is_debug(&self) -> bool {
        self.enabled(LogLevel::Debug)
    }

    /// Log an outgoing request
    pub fn log_request(&self, method: &str, uri: &str, attributes: HashMap<String, String>) {
        if !self.is_debug() {
            return;
        }
        let attrs = self.redact_attributes(attributes);
        debug!(method = method, uri = uri, attributes = ?attrs, "Sending request");
    }

    /// Log a received response
    pub fn log_response(&self, method: &str, uri: &str, status: u16, duration_ms: u64) {
        if !self.is_debug() {
            return;
        }
        debug!(
            method = method,
            uri = uri,
            status = status,
            duration_ms = duration_ms,
            "Response received"
        );
    }

    /// Log an informational message
    pub fn log_info(&self, message: &str, attributes: HashMap<String, String>) {
        if !self.enabled(LogLevel::Info) {
            return;
        }
        let attrs = self.redact_attributes(attributes);
        info!(attributes = ?attrs, "{}", message);
    }

    /// Log an error
    pub fn log_error(&self, operation: &str, error: &str) {
        if !self.enabled(LogLevel::Error) {
            return;
        }
        error!(operation = operation, error = error, "Request failed");
    }

    /// Log a warning
    pub fn log_warning(&self, message: &str, attributes: HashMap<String, String>) {
        if !self.enabled(LogLevel::Warn) {
            return;
        }
        let attrs = self.redact_attributes(attributes);
        warn!(attributes = ?attrs, "{}", message);
    }

    /// Log debug information
    pub fn log_debug(&self, message: &str, attributes: HashMap<String, String>) {
        if !self.is_debug() {
            return;
        }
        let attrs = self.redact_attributes(attributes);
        debug!(attributes = ?attrs, "{}", message);
    }

    /// Redact sensitive attributes if configured
    pub(crate) fn redact_attributes(
        &self,
        mut attrs: HashMap<String, String>,
    ) -> HashMap<String, String> {
        if !self.config.redact_sensitive {
            return attrs;
        }

        let sensitive_keys = ["authorization", "token", "secret", "password", "credential"];

        for key in attrs.keys().cloned().collect::<Vec<_>>() {
            let key_lower = key.to_lowercase();
            if sensitive_keys.iter().any(|s| key_lower.contains(s)) {
                attrs.insert(key, "[REDACTED]".to_string());
            }
        }

        attrs
    }
}
