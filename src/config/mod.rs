//! Client configuration.

mod contexts;

pub use contexts::Contexts;
pub(crate) use contexts::from_yaml;

use crate::auth::{Authentication, Authenticator, BasicCredentials};
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::DEFAULT_TIMEOUT;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

/// Configuration for one Lenses connection.
///
/// Usually one entry of a [`Contexts`] file, or built with
/// [`ClientConfig::builder`].
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Lenses server, e.g. `https://lenses.example.com:9991`
    pub host: String,
    /// Session token; when set no login is performed
    #[serde(default)]
    pub token: Option<SecretString>,
    /// Login method used when no token is available
    #[serde(default)]
    pub authentication: Option<Authentication>,
    /// Request timeout as a human readable duration (`15s`, `1m 30s`)
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
    /// Debug mode: request traces and verbose error reporting
    #[serde(default)]
    pub debug: bool,
}

impl ClientConfig {
    /// Creates a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads `LENSES_HOST` (required), `LENSES_TOKEN`, `LENSES_USER` and
    /// `LENSES_PASSWORD`, `LENSES_TIMEOUT`, `LENSES_INSECURE` and `LENSES_DEBUG`.
    pub fn from_env() -> LensesResult<Self> {
        let host = std::env::var("LENSES_HOST").map_err(|_| LensesError::Configuration {
            message: "LENSES_HOST environment variable not set".to_string(),
        })?;

        let mut builder = Self::builder().host(host);

        if let Ok(token) = std::env::var("LENSES_TOKEN") {
            builder = builder.token(SecretString::new(token));
        }

        if let (Ok(user), Ok(password)) =
            (std::env::var("LENSES_USER"), std::env::var("LENSES_PASSWORD"))
        {
            builder = builder.authentication(Authentication::Basic(BasicCredentials::new(
                user, password,
            )));
        }

        if let Ok(timeout) = std::env::var("LENSES_TIMEOUT") {
            builder = builder.timeout(timeout);
        }

        builder = builder
            .insecure(env_flag("LENSES_INSECURE"))
            .debug(env_flag("LENSES_DEBUG"));

        builder.build()
    }

    /// Parsed request timeout
    pub fn timeout_duration(&self) -> LensesResult<Duration> {
        parse_timeout(&self.timeout)
    }

    /// Check the configuration without touching the network
    pub fn validate(&self) -> LensesResult<()> {
        self.validate_endpoint()?;

        if self.token.is_none() {
            if let Some(auth) = &self.authentication {
                auth.validate()?;
            }
        }

        Ok(())
    }

    /// Check host and timeout only, leaving the authentication method alone
    pub fn validate_endpoint(&self) -> LensesResult<()> {
        let mut details = Vec::new();

        match url::Url::parse(&self.host) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => details.push(ValidationDetail::with_value(
                "host",
                "scheme must be http or https",
                url.scheme().to_string(),
            )),
            Err(e) => details.push(ValidationDetail::with_value(
                "host",
                e.to_string(),
                self.host.clone(),
            )),
        }

        if let Err(e) = self.timeout_duration() {
            details.push(ValidationDetail::with_value(
                "timeout",
                e.to_string(),
                self.timeout.clone(),
            ));
        }

        if !details.is_empty() {
            return Err(LensesError::Validation {
                message: "invalid client configuration".to_string(),
                details,
            });
        }

        Ok(())
    }
}

/// Parse a human readable duration such as `15s` or `2m`
pub fn parse_timeout(value: &str) -> LensesResult<Duration> {
    humantime::parse_duration(value.trim()).map_err(|e| LensesError::Configuration {
        message: format!("invalid timeout {:?}: {}", value, e),
    })
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    host: Option<String>,
    token: Option<SecretString>,
    authentication: Option<Authentication>,
    timeout: Option<String>,
    insecure: bool,
    debug: bool,
}

impl ClientConfigBuilder {
    /// Sets the server URL
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets a session token, skipping login
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the login method
    pub fn authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Sets the request timeout (`15s`, `1m`)
    pub fn timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    /// Sets the request timeout from a duration
    pub fn timeout_duration(mut self, timeout: Duration) -> Self {
        self.timeout = Some(humantime::format_duration(timeout).to_string());
        self
    }

    /// Skip TLS certificate verification
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Enable debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the configuration
    pub fn build(self) -> LensesResult<ClientConfig> {
        let host = self.host.ok_or_else(|| LensesError::Configuration {
            message: "host is required".to_string(),
        })?;

        let config = ClientConfig {
            host,
            token: self.token,
            authentication: self.authentication,
            timeout: self.timeout.unwrap_or_else(default_timeout),
            insecure: self.insecure,
            debug: self.debug,
        };

        config.validate()?;
        Ok(config)
    }
}
