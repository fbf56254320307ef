//! Groups service implementation.

use super::types::Group;
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::services::{require, segment};
use crate::transport::QueryOption;
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;

const GROUPS_PATH: &str = "api/v1/group/groups";

/// Groups service trait for testability
#[async_trait]
pub trait GroupsService: Send + Sync {
    /// All groups
    async fn list(&self) -> LensesResult<Vec<Group>>;

    /// Get a group
    async fn get(&self, name: &str) -> LensesResult<Group>;

    /// Create a group
    async fn create(&self, group: &Group) -> LensesResult<()>;

    /// Replace a group's description and permissions
    async fn update(&self, name: &str, group: &Group) -> LensesResult<()>;

    /// Delete a group
    async fn delete(&self, name: &str) -> LensesResult<()>;

    /// Copy a group and its permissions under a new name
    async fn clone_group(&self, name: &str, clone_name: &str) -> LensesResult<()>;
}

/// Implementation of the Groups service
pub struct GroupsServiceImpl {
    client: Arc<RestClient>,
}

impl GroupsServiceImpl {
    /// Create a new Groups service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    fn group_path(name: &str) -> String {
        format!("{}/{}", GROUPS_PATH, segment(name))
    }
}

fn validate(group: &Group) -> LensesResult<()> {
    require("name", &group.name)?;
    let empty = group
        .namespaces
        .iter()
        .position(|ns| ns.wildcards.is_empty() || ns.permissions.is_empty());
    if let Some(index) = empty {
        return Err(LensesError::Validation {
            message: "namespaces need at least one wildcard and one permission".to_string(),
            details: vec![ValidationDetail::new(
                format!("namespaces[{}]", index),
                "wildcards and permissions must not be empty",
            )],
        });
    }
    Ok(())
}

#[async_trait]
impl GroupsService for GroupsServiceImpl {
    async fn list(&self) -> LensesResult<Vec<Group>> {
        self.client.get_json(GROUPS_PATH).await
    }

    async fn get(&self, name: &str) -> LensesResult<Group> {
        require("name", name)?;
        self.client.get_json(&Self::group_path(name)).await
    }

    async fn create(&self, group: &Group) -> LensesResult<()> {
        validate(group)?;
        self.client.send(Method::POST, GROUPS_PATH, Some(group)).await
    }

    async fn update(&self, name: &str, group: &Group) -> LensesResult<()> {
        require("name", name)?;
        validate(group)?;
        self.client
            .send(Method::PUT, &Self::group_path(name), Some(group))
            .await
    }

    async fn delete(&self, name: &str) -> LensesResult<()> {
        require("name", name)?;
        self.client.delete(&Self::group_path(name)).await
    }

    async fn clone_group(&self, name: &str, clone_name: &str) -> LensesResult<()> {
        require("name", name)?;
        require("clone_name", clone_name)?;

        let query = QueryOption::new().param("cloneName", clone_name);
        let response = self
            .client
            .execute(
                Method::POST,
                &format!("{}/clone", Self::group_path(name)),
                None,
                None,
                &[&query],
            )
            .await?;
        self.client.read_body(response).await?;
        Ok(())
    }
}
