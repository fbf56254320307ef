//! Logging for the Lenses client.

mod logging;

pub use logging::{ClientLogger, LogFormat, LogLevel, LoggingConfig};

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber for a binary embedding this crate.
///
/// `RUST_LOG` overrides the configured level. Returns `false` when a global
/// subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let level: tracing::Level = config.level.into();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.include_target);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.is_ok()
}
