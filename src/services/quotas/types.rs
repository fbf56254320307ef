//! Types for the Quotas service.

use crate::services::segment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A quota as listed by Lenses
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    /// `USER`, `USERCLIENT`, `CLIENT` or one of the default variants
    pub entity_type: String,
    /// User or client id the quota applies to
    #[serde(default)]
    pub entity_name: String,
    /// Client id, for user+client quotas
    #[serde(default)]
    pub child: Option<String>,
    /// Configured limits
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// API path of this quota
    #[serde(default)]
    pub url: Option<String>,
}

/// Quota limits; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct QuotaConfig {
    /// Producer byte rate per broker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_byte_rate: Option<String>,
    /// Consumer byte rate per broker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_byte_rate: Option<String>,
    /// Request handler time percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_percentage: Option<String>,
}

impl QuotaConfig {
    /// True when no limit is set
    pub fn is_empty(&self) -> bool {
        self.producer_byte_rate.is_none()
            && self.consumer_byte_rate.is_none()
            && self.request_percentage.is_none()
    }
}

/// Who a quota applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaTarget {
    /// One user
    User(String),
    /// Default for all users
    UsersDefault,
    /// One user connecting with one client id
    UserClient {
        /// User name
        user: String,
        /// Client id
        client: String,
    },
    /// Default for all client ids of one user
    UserClientsDefault(String),
    /// One client id
    Client(String),
    /// Default for all client ids
    ClientsDefault,
}

impl QuotaTarget {
    /// API path of the quota
    pub fn path(&self) -> String {
        match self {
            QuotaTarget::User(user) => format!("api/quotas/users/{}", segment(user)),
            QuotaTarget::UsersDefault => "api/quotas/users".to_string(),
            QuotaTarget::UserClient { user, client } => format!(
                "api/quotas/users/{}/clients/{}",
                segment(user),
                segment(client)
            ),
            QuotaTarget::UserClientsDefault(user) => {
                format!("api/quotas/users/{}/clients", segment(user))
            }
            QuotaTarget::Client(client) => format!("api/quotas/clients/{}", segment(client)),
            QuotaTarget::ClientsDefault => "api/quotas/clients".to_string(),
        }
    }

    pub(super) fn names(&self) -> Vec<(&'static str, &str)> {
        match self {
            QuotaTarget::User(user) | QuotaTarget::UserClientsDefault(user) => {
                vec![("user", user.as_str())]
            }
            QuotaTarget::UserClient { user, client } => {
                vec![("user", user.as_str()), ("client", client.as_str())]
            }
            QuotaTarget::Client(client) => vec![("client", client.as_str())],
            QuotaTarget::UsersDefault | QuotaTarget::ClientsDefault => Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SetQuotaRequest<'a> {
    pub config: &'a QuotaConfig,
}
