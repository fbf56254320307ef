//! Authentication against the Lenses API.
//!
//! Login methods form a closed set: basic credentials and three Kerberos
//! flavours. Every method implements [`Authenticator`] and yields the
//! session token the client then sends on each request.

use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::transport::{HeaderOption, CONTENT_TYPE_JSON};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use http::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Endpoint exchanging basic credentials for a session token
pub const LOGIN_PATH: &str = "api/login";

/// Endpoint exchanging a SPNEGO token for a session token
pub const KERBEROS_LOGIN_PATH: &str = "api/auth/kerberos";

/// Default location of the Kerberos configuration file
pub const DEFAULT_KRB5_CONFIG: &str = "/etc/krb5.conf";

fn default_krb5_config() -> PathBuf {
    PathBuf::from(DEFAULT_KRB5_CONFIG)
}

/// Username and password login
#[derive(Debug, Clone, Deserialize)]
pub struct BasicCredentials {
    /// Lenses username
    pub username: String,
    /// Lenses password
    pub password: SecretString,
}

impl BasicCredentials {
    /// Create basic credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// Kerberos login with a principal password
#[derive(Debug, Clone, Deserialize)]
pub struct KerberosWithPassword {
    /// Principal name
    pub username: String,
    /// Principal password
    pub password: SecretString,
    /// Realm, when it differs from the default realm of the krb5 config
    #[serde(default)]
    pub realm: Option<String>,
    /// Kerberos configuration file
    #[serde(default = "default_krb5_config")]
    pub config_file: PathBuf,
}

/// Kerberos login with a keytab
#[derive(Debug, Clone, Deserialize)]
pub struct KerberosWithKeytab {
    /// Principal name
    pub username: String,
    /// Realm, when it differs from the default realm of the krb5 config
    #[serde(default)]
    pub realm: Option<String>,
    /// Keytab file holding the principal keys
    pub keytab_file: PathBuf,
    /// Kerberos configuration file
    #[serde(default = "default_krb5_config")]
    pub config_file: PathBuf,
}

/// Kerberos login reusing an existing credential cache
#[derive(Debug, Clone, Deserialize)]
pub struct KerberosFromCCache {
    /// Credential cache file
    pub ccache_file: PathBuf,
    /// Kerberos configuration file
    #[serde(default = "default_krb5_config")]
    pub config_file: PathBuf,
}

/// The configured login method
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authentication {
    /// Username and password
    Basic(BasicCredentials),
    /// Kerberos principal and password
    KerberosWithPassword(KerberosWithPassword),
    /// Kerberos principal and keytab
    KerberosWithKeytab(KerberosWithKeytab),
    /// Kerberos credential cache
    #[serde(rename = "kerberos_from_ccache")]
    KerberosFromCCache(KerberosFromCCache),
}

/// Borrowed view of a Kerberos login method, handed to a [`SpnegoProvider`]
#[derive(Debug, Clone, Copy)]
pub enum KerberosMethod<'a> {
    /// Principal and password
    Password(&'a KerberosWithPassword),
    /// Principal and keytab
    Keytab(&'a KerberosWithKeytab),
    /// Credential cache
    CCache(&'a KerberosFromCCache),
}

/// Produces the initial SPNEGO (GSS-API) token for a Kerberos login.
///
/// The ticket exchange with the KDC lives behind this trait so the client
/// does not link a Kerberos implementation itself.
pub trait SpnegoProvider: Send + Sync {
    /// Initial context token for `service_principal` (e.g. `HTTP/lenses.example.com`)
    fn init_sec_context(
        &self,
        method: KerberosMethod<'_>,
        service_principal: &str,
    ) -> LensesResult<Vec<u8>>;
}

/// What an authenticator may use during login
pub struct LoginContext<'a> {
    /// Client used for the login round trip (no token set yet)
    pub client: &'a RestClient,
    /// Ticket source for the Kerberos methods
    pub spnego: Option<&'a dyn SpnegoProvider>,
}

/// A login method able to produce a session token
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check the method's fields without touching the network
    fn validate(&self) -> LensesResult<()>;

    /// Log in and return the session token
    async fn authenticate(&self, ctx: &LoginContext<'_>) -> LensesResult<SecretString>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    user: &'a str,
    password: &'a str,
}

#[async_trait]
impl Authenticator for BasicCredentials {
    fn validate(&self) -> LensesResult<()> {
        let mut details = Vec::new();
        if self.username.trim().is_empty() {
            details.push(ValidationDetail::new("username", "must not be empty"));
        }
        if self.password.expose_secret().is_empty() {
            details.push(ValidationDetail::new("password", "must not be empty"));
        }
        invalid_if_any("basic authentication", details)
    }

    async fn authenticate(&self, ctx: &LoginContext<'_>) -> LensesResult<SecretString> {
        self.validate()?;

        let body = serde_json::to_vec(&LoginRequest {
            user: &self.username,
            password: self.password.expose_secret(),
        })?;

        let response = ctx
            .client
            .execute(
                Method::POST,
                LOGIN_PATH,
                Some(CONTENT_TYPE_JSON),
                Some(Bytes::from(body)),
                &[],
            )
            .await?;

        session_token(ctx.client.read_body(response).await?)
    }
}

#[async_trait]
impl Authenticator for KerberosWithPassword {
    fn validate(&self) -> LensesResult<()> {
        let mut details = Vec::new();
        if self.username.trim().is_empty() {
            details.push(ValidationDetail::new("username", "must not be empty"));
        }
        if self.password.expose_secret().is_empty() {
            details.push(ValidationDetail::new("password", "must not be empty"));
        }
        invalid_if_any("kerberos password authentication", details)
    }

    async fn authenticate(&self, ctx: &LoginContext<'_>) -> LensesResult<SecretString> {
        self.validate()?;
        kerberos_login(ctx, KerberosMethod::Password(self)).await
    }
}

#[async_trait]
impl Authenticator for KerberosWithKeytab {
    fn validate(&self) -> LensesResult<()> {
        let mut details = Vec::new();
        if self.username.trim().is_empty() {
            details.push(ValidationDetail::new("username", "must not be empty"));
        }
        check_file("keytab_file", &self.keytab_file, &mut details);
        invalid_if_any("kerberos keytab authentication", details)
    }

    async fn authenticate(&self, ctx: &LoginContext<'_>) -> LensesResult<SecretString> {
        self.validate()?;
        kerberos_login(ctx, KerberosMethod::Keytab(self)).await
    }
}

#[async_trait]
impl Authenticator for KerberosFromCCache {
    fn validate(&self) -> LensesResult<()> {
        let mut details = Vec::new();
        check_file("ccache_file", &self.ccache_file, &mut details);
        invalid_if_any("kerberos ccache authentication", details)
    }

    async fn authenticate(&self, ctx: &LoginContext<'_>) -> LensesResult<SecretString> {
        self.validate()?;
        kerberos_login(ctx, KerberosMethod::CCache(self)).await
    }
}

impl Authentication {
    fn authenticator(&self) -> &dyn Authenticator {
        match self {
            Authentication::Basic(m) => m,
            Authentication::KerberosWithPassword(m) => m,
            Authentication::KerberosWithKeytab(m) => m,
            Authentication::KerberosFromCCache(m) => m,
        }
    }

    /// Short name of the method, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Authentication::Basic(_) => "basic",
            Authentication::KerberosWithPassword(_) => "kerberos_with_password",
            Authentication::KerberosWithKeytab(_) => "kerberos_with_keytab",
            Authentication::KerberosFromCCache(_) => "kerberos_from_ccache",
        }
    }
}

#[async_trait]
impl Authenticator for Authentication {
    fn validate(&self) -> LensesResult<()> {
        self.authenticator().validate()
    }

    async fn authenticate(&self, ctx: &LoginContext<'_>) -> LensesResult<SecretString> {
        self.authenticator().authenticate(ctx).await
    }
}

async fn kerberos_login(
    ctx: &LoginContext<'_>,
    method: KerberosMethod<'_>,
) -> LensesResult<SecretString> {
    let provider = ctx.spnego.ok_or_else(|| LensesError::Authentication {
        message: "kerberos authentication requires a SPNEGO provider".to_string(),
    })?;

    let service_principal = format!("HTTP/{}", ctx.client.host_name()?);
    let token = provider.init_sec_context(method, &service_principal)?;
    let negotiate = HeaderOption::new(
        "authorization",
        &format!("Negotiate {}", STANDARD.encode(token)),
    )?;

    let response = ctx
        .client
        .execute(Method::GET, KERBEROS_LOGIN_PATH, None, None, &[&negotiate])
        .await?;

    session_token(ctx.client.read_body(response).await?)
}

/// Interpret a login response body as the session token
fn session_token(body: Bytes) -> LensesResult<SecretString> {
    let token = String::from_utf8_lossy(&body).trim().to_string();
    if token.is_empty() {
        return Err(LensesError::Authentication {
            message: "login failed: no session token returned".to_string(),
        });
    }
    Ok(SecretString::new(token))
}

fn check_file(field: &str, path: &Path, details: &mut Vec<ValidationDetail>) {
    if path.as_os_str().is_empty() {
        details.push(ValidationDetail::new(field, "must not be empty"));
    } else if !path.is_file() {
        details.push(ValidationDetail::with_value(
            field,
            "file does not exist",
            path.display().to_string(),
        ));
    }
}

fn invalid_if_any(method: &str, details: Vec<ValidationDetail>) -> LensesResult<()> {
    if details.is_empty() {
        return Ok(());
    }
    Err(LensesError::Validation {
        message: format!("invalid {} settings", method),
        details,
    })
}
