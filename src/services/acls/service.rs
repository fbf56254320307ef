//! ACLs service implementation.

use super::types::Acl;
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::transport::CONTENT_TYPE_JSON;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::sync::Arc;

const ACL_PATH: &str = "api/acl";

/// ACLs service trait for testability
#[async_trait]
pub trait AclsService: Send + Sync {
    /// All ACLs of the cluster
    async fn list(&self) -> LensesResult<Vec<Acl>>;

    /// Create an ACL, or update the one with the same identity
    async fn create_or_update(&self, acl: &Acl) -> LensesResult<()>;

    /// Delete an ACL
    async fn delete(&self, acl: &Acl) -> LensesResult<()>;
}

/// Implementation of the ACLs service
pub struct AclsServiceImpl {
    client: Arc<RestClient>,
}

impl AclsServiceImpl {
    /// Create a new ACLs service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

fn validate(acl: &Acl) -> LensesResult<()> {
    let fields = [
        ("resource_type", &acl.resource_type),
        ("resource_name", &acl.resource_name),
        ("principal", &acl.principal),
        ("permission_type", &acl.permission_type),
        ("operation", &acl.operation),
    ];
    let details: Vec<ValidationDetail> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ValidationDetail::new(*field, "must not be empty"))
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(LensesError::Validation {
            message: "invalid ACL".to_string(),
            details,
        })
    }
}

#[async_trait]
impl AclsService for AclsServiceImpl {
    async fn list(&self) -> LensesResult<Vec<Acl>> {
        self.client.get_json(ACL_PATH).await
    }

    async fn create_or_update(&self, acl: &Acl) -> LensesResult<()> {
        validate(acl)?;
        self.client.send(Method::PUT, ACL_PATH, Some(acl)).await
    }

    async fn delete(&self, acl: &Acl) -> LensesResult<()> {
        validate(acl)?;
        let body = Bytes::from(serde_json::to_vec(acl)?);
        let response = self
            .client
            .execute(Method::DELETE, ACL_PATH, Some(CONTENT_TYPE_JSON), Some(body), &[])
            .await?;
        self.client.read_body(response).await?;
        Ok(())
    }
}
