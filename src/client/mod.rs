//! Connection bootstrap and the client facade.

mod rest;

pub use rest::RestClient;

use crate::auth::{Authenticator, LoginContext, SpnegoProvider};
use crate::config::ClientConfig;
use crate::errors::{LensesError, LensesResult};
use crate::observability::ClientLogger;
use crate::services::acls::{AclsService, AclsServiceImpl};
use crate::services::alerts::{AlertsService, AlertsServiceImpl};
use crate::services::audits::{AuditsService, AuditsServiceImpl};
use crate::services::connectors::{ConnectorsService, ConnectorsServiceImpl};
use crate::services::groups::{GroupsService, GroupsServiceImpl};
use crate::services::logs::{LogsService, LogsServiceImpl};
use crate::services::policies::{PoliciesService, PoliciesServiceImpl};
use crate::services::quotas::{QuotasService, QuotasServiceImpl};
use crate::services::schemas::{SchemasService, SchemasServiceImpl};
use crate::services::topics::{TopicsService, TopicsServiceImpl};
use crate::services::users::{UsersService, UsersServiceImpl};
use crate::transport::{HttpTransport, ReqwestTransport, RequestOption, TransportSettings};
use crate::types::UserProfile;
use http::{Method, StatusCode};
use once_cell::sync::OnceCell;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const PROFILE_PATH: &str = "api/auth";
const LOGOUT_PATH: &str = "api/logout";

/// Overrides accepted by [`LensesClient::connect`]
pub enum ConnectOption {
    /// Use this session token and skip login
    Token(SecretString),
    /// Lower bound for the request timeout
    Timeout(Duration),
    /// Send requests through this transport instead of reqwest
    Transport(Arc<dyn HttpTransport>),
    /// Apply this option to every request, before the per-call options
    RequestModifier(Arc<dyn RequestOption>),
    /// Log through this logger
    Logger(ClientLogger),
    /// Ticket source for Kerberos logins
    Spnego(Arc<dyn SpnegoProvider>),
}

impl std::fmt::Debug for ConnectOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectOption::Token(_) => f.write_str("Token([REDACTED])"),
            ConnectOption::Timeout(t) => f.debug_tuple("Timeout").field(t).finish(),
            ConnectOption::Transport(_) => f.write_str("Transport(..)"),
            ConnectOption::RequestModifier(_) => f.write_str("RequestModifier(..)"),
            ConnectOption::Logger(l) => f.debug_tuple("Logger").field(l).finish(),
            ConnectOption::Spnego(_) => f.write_str("Spnego(..)"),
        }
    }
}

#[derive(Default)]
struct Overrides {
    token: Option<SecretString>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn HttpTransport>>,
    modifier: Option<Arc<dyn RequestOption>>,
    logger: Option<ClientLogger>,
    spnego: Option<Arc<dyn SpnegoProvider>>,
}

impl Overrides {
    fn collect(options: Vec<ConnectOption>) -> Self {
        let mut overrides = Self::default();
        for option in options {
            match option {
                ConnectOption::Token(token) => overrides.token = Some(token),
                ConnectOption::Timeout(timeout) => overrides.timeout = Some(timeout),
                ConnectOption::Transport(transport) => overrides.transport = Some(transport),
                ConnectOption::RequestModifier(m) => overrides.modifier = Some(m),
                ConnectOption::Logger(logger) => overrides.logger = Some(logger),
                ConnectOption::Spnego(provider) => overrides.spnego = Some(provider),
            }
        }
        overrides
    }
}

/// The larger of the configured timeout and an already set one
pub fn effective_timeout(configured: Duration, existing: Option<Duration>) -> Duration {
    existing.map_or(configured, |t| t.max(configured))
}

/// An authenticated connection to a Lenses server
pub struct LensesClient {
    config: Arc<ClientConfig>,
    rest: Arc<RestClient>,
    timeout: Duration,
    spnego: Option<Arc<dyn SpnegoProvider>>,

    // Lazily initialized services
    topics_service: OnceCell<Arc<dyn TopicsService>>,
    connectors_service: OnceCell<Arc<dyn ConnectorsService>>,
    schemas_service: OnceCell<Arc<dyn SchemasService>>,
    acls_service: OnceCell<Arc<dyn AclsService>>,
    quotas_service: OnceCell<Arc<dyn QuotasService>>,
    alerts_service: OnceCell<Arc<dyn AlertsService>>,
    audits_service: OnceCell<Arc<dyn AuditsService>>,
    logs_service: OnceCell<Arc<dyn LogsService>>,
    users_service: OnceCell<Arc<dyn UsersService>>,
    groups_service: OnceCell<Arc<dyn GroupsService>>,
    policies_service: OnceCell<Arc<dyn PoliciesService>>,
}

impl std::fmt::Debug for LensesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LensesClient")
            .field("host", &self.config.host)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl LensesClient {
    /// Connect to the server described by `config`.
    ///
    /// The token comes from [`ConnectOption::Token`], then `config.token`,
    /// and only otherwise from a login with `config.authentication`, which
    /// is the only path that validates the authentication method.
    pub async fn connect(config: ClientConfig, options: Vec<ConnectOption>) -> LensesResult<Self> {
        config.validate_endpoint()?;
        let overrides = Overrides::collect(options);

        let timeout = effective_timeout(config.timeout_duration()?, overrides.timeout);

        let transport = match overrides.transport {
            Some(transport) => transport,
            None => {
                let settings = TransportSettings::new(timeout).with_insecure(config.insecure);
                Arc::new(ReqwestTransport::new(&settings)?)
            }
        };

        let mut logger = overrides.logger.unwrap_or_default();
        if config.debug {
            logger = logger.into_debug();
        }

        let mut rest = RestClient::new(&config.host, transport)?.with_logger(logger);
        if let Some(modifier) = overrides.modifier {
            rest = rest.with_request_modifier(modifier);
        }

        let token = overrides
            .token
            .or_else(|| config.token.clone())
            .filter(|t| !t.expose_secret().is_empty());

        let client = Self::from_parts(config, Arc::new(rest), timeout, overrides.spnego);
        match token {
            Some(token) => client.rest.set_token(token),
            None => client.login().await?,
        }
        Ok(client)
    }

    fn from_parts(
        config: ClientConfig,
        rest: Arc<RestClient>,
        timeout: Duration,
        spnego: Option<Arc<dyn SpnegoProvider>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            rest,
            timeout,
            spnego,
            topics_service: OnceCell::new(),
            connectors_service: OnceCell::new(),
            schemas_service: OnceCell::new(),
            acls_service: OnceCell::new(),
            quotas_service: OnceCell::new(),
            alerts_service: OnceCell::new(),
            audits_service: OnceCell::new(),
            logs_service: OnceCell::new(),
            users_service: OnceCell::new(),
            groups_service: OnceCell::new(),
            policies_service: OnceCell::new(),
        }
    }

    /// Log in with the configured authentication and store the new session token
    pub async fn login(&self) -> LensesResult<()> {
        let authentication =
            self.config
                .authentication
                .as_ref()
                .ok_or_else(|| LensesError::Authentication {
                    message: "no token and no authentication method configured".to_string(),
                })?;

        let ctx = LoginContext {
            client: &self.rest,
            spnego: self.spnego.as_deref(),
        };
        let token = authentication.authenticate(&ctx).await?;
        if token.expose_secret().is_empty() {
            return Err(LensesError::Authentication {
                message: "login failed: no session token returned".to_string(),
            });
        }

        let mut attributes = HashMap::new();
        attributes.insert("method".to_string(), authentication.kind().to_string());
        self.rest.logger().log_info("Logged in", attributes);

        self.rest.set_token(token);
        Ok(())
    }

    /// Profile of the user the session belongs to
    pub async fn user_profile(&self) -> LensesResult<UserProfile> {
        self.rest.get_json(PROFILE_PATH).await
    }

    /// End the session and forget the token
    pub async fn logout(&self) -> LensesResult<()> {
        let result = match self.rest.execute(Method::GET, LOGOUT_PATH, None, None, &[]).await {
            Ok(response) => self.rest.read_body(response).await.map(|_| ()),
            Err(LensesError::Resource(e)) if e.status() == StatusCode::NO_CONTENT => Ok(()),
            Err(e) => Err(e),
        };
        self.rest.clear_token();
        result
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Effective request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying request/response client
    pub fn rest(&self) -> &Arc<RestClient> {
        &self.rest
    }

    /// Get the topics service
    pub fn topics(&self) -> Arc<dyn TopicsService> {
        self.topics_service
            .get_or_init(|| Arc::new(TopicsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the connectors service
    pub fn connectors(&self) -> Arc<dyn ConnectorsService> {
        self.connectors_service
            .get_or_init(|| Arc::new(ConnectorsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the schemas service
    pub fn schemas(&self) -> Arc<dyn SchemasService> {
        self.schemas_service
            .get_or_init(|| Arc::new(SchemasServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the ACLs service
    pub fn acls(&self) -> Arc<dyn AclsService> {
        self.acls_service
            .get_or_init(|| Arc::new(AclsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the quotas service
    pub fn quotas(&self) -> Arc<dyn QuotasService> {
        self.quotas_service
            .get_or_init(|| Arc::new(QuotasServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the alerts service
    pub fn alerts(&self) -> Arc<dyn AlertsService> {
        self.alerts_service
            .get_or_init(|| Arc::new(AlertsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the audits service
    pub fn audits(&self) -> Arc<dyn AuditsService> {
        self.audits_service
            .get_or_init(|| Arc::new(AuditsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the logs service
    pub fn logs(&self) -> Arc<dyn LogsService> {
        self.logs_service
            .get_or_init(|| Arc::new(LogsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the users service
    pub fn users(&self) -> Arc<dyn UsersService> {
        self.users_service
            .get_or_init(|| Arc::new(UsersServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the groups service
    pub fn groups(&self) -> Arc<dyn GroupsService> {
        self.groups_service
            .get_or_init(|| Arc::new(GroupsServiceImpl::new(self.rest.clone())))
            .clone()
    }

    /// Get the data policies service
    pub fn policies(&self) -> Arc<dyn PoliciesService> {
        self.policies_service
            .get_or_init(|| Arc::new(PoliciesServiceImpl::new(self.rest.clone())))
            .clone()
    }
}
