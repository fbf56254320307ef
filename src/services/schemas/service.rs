//! Schemas service implementation.
//!
//! Requests go through the Lenses schema registry proxy and use the
//! registry's own JSON content type.

use super::types::{
    CompatibilityLevel, CompatibilityRequest, CompatibilityResponse, RegisterRequest,
    RegisterResponse, Schema, SchemaVersion,
};
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult, ValidationDetail};
use crate::services::{require, segment};
use crate::transport::CONTENT_TYPE_SCHEMA_JSON;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

const SUBJECTS_PATH: &str = "api/proxy-sr/subjects";
const CONFIG_PATH: &str = "api/proxy-sr/config";

/// Schemas service trait for testability
#[async_trait]
pub trait SchemasService: Send + Sync {
    /// All registered subjects
    async fn subjects(&self) -> LensesResult<Vec<String>>;

    /// Versions registered under a subject
    async fn versions(&self, subject: &str) -> LensesResult<Vec<u32>>;

    /// One version of a subject's schema
    async fn get_version(&self, subject: &str, version: SchemaVersion) -> LensesResult<Schema>;

    /// The latest version of a subject's schema
    async fn latest(&self, subject: &str) -> LensesResult<Schema>;

    /// Register a schema under a subject, returning its id
    async fn register(&self, subject: &str, schema: &str) -> LensesResult<u32>;

    /// Delete a subject, returning the deleted versions
    async fn delete_subject(&self, subject: &str) -> LensesResult<Vec<u32>>;

    /// Registry-wide compatibility level
    async fn global_compatibility(&self) -> LensesResult<CompatibilityLevel>;

    /// Change the registry-wide compatibility level
    async fn set_global_compatibility(&self, level: CompatibilityLevel) -> LensesResult<()>;

    /// Compatibility level of a subject
    async fn subject_compatibility(&self, subject: &str) -> LensesResult<CompatibilityLevel>;

    /// Change the compatibility level of a subject
    async fn set_subject_compatibility(
        &self,
        subject: &str,
        level: CompatibilityLevel,
    ) -> LensesResult<()>;
}

/// Implementation of the Schemas service
pub struct SchemasServiceImpl {
    client: Arc<RestClient>,
}

impl SchemasServiceImpl {
    /// Create a new Schemas service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    fn subject_path(subject: &str) -> String {
        format!("{}/{}", SUBJECTS_PATH, segment(subject))
    }

    async fn send_registry<B, T>(&self, method: Method, path: &str, body: &B) -> LensesResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let payload = Bytes::from(serde_json::to_vec(body)?);
        let response = self
            .client
            .execute(method, path, Some(CONTENT_TYPE_SCHEMA_JSON), Some(payload), &[])
            .await?;
        self.client.read_json(response).await
    }
}

#[async_trait]
impl SchemasService for SchemasServiceImpl {
    async fn subjects(&self) -> LensesResult<Vec<String>> {
        self.client.get_json(SUBJECTS_PATH).await
    }

    async fn versions(&self, subject: &str) -> LensesResult<Vec<u32>> {
        require("subject", subject)?;
        self.client
            .get_json(&format!("{}/versions", Self::subject_path(subject)))
            .await
    }

    async fn get_version(&self, subject: &str, version: SchemaVersion) -> LensesResult<Schema> {
        require("subject", subject)?;
        if version == SchemaVersion::Number(0) {
            return Err(LensesError::Validation {
                message: "schema versions start at 1".to_string(),
                details: vec![ValidationDetail::with_value("version", "must be at least 1", "0")],
            });
        }
        self.client
            .get_json(&format!(
                "{}/versions/{}",
                Self::subject_path(subject),
                version
            ))
            .await
    }

    async fn latest(&self, subject: &str) -> LensesResult<Schema> {
        self.get_version(subject, SchemaVersion::Latest).await
    }

    async fn register(&self, subject: &str, schema: &str) -> LensesResult<u32> {
        require("subject", subject)?;
        require("schema", schema)?;
        if let Err(e) = serde_json::from_str::<serde_json::Value>(schema) {
            return Err(LensesError::Validation {
                message: "schema is not valid JSON".to_string(),
                details: vec![ValidationDetail::new("schema", e.to_string())],
            });
        }

        let response: RegisterResponse = self
            .send_registry(
                Method::POST,
                &format!("{}/versions", Self::subject_path(subject)),
                &RegisterRequest { schema },
            )
            .await?;
        Ok(response.id)
    }

    async fn delete_subject(&self, subject: &str) -> LensesResult<Vec<u32>> {
        require("subject", subject)?;
        let response = self
            .client
            .execute(Method::DELETE, &Self::subject_path(subject), None, None, &[])
            .await?;
        self.client.read_json(response).await
    }

    async fn global_compatibility(&self) -> LensesResult<CompatibilityLevel> {
        let response: CompatibilityResponse = self.client.get_json(CONFIG_PATH).await?;
        Ok(response.compatibility_level)
    }

    async fn set_global_compatibility(&self, level: CompatibilityLevel) -> LensesResult<()> {
        let _: serde_json::Value = self
            .send_registry(
                Method::PUT,
                CONFIG_PATH,
                &CompatibilityRequest {
                    compatibility: level,
                },
            )
            .await?;
        Ok(())
    }

    async fn subject_compatibility(&self, subject: &str) -> LensesResult<CompatibilityLevel> {
        require("subject", subject)?;
        let response: CompatibilityResponse = self
            .client
            .get_json(&format!("{}/{}", CONFIG_PATH, segment(subject)))
            .await?;
        Ok(response.compatibility_level)
    }

    async fn set_subject_compatibility(
        &self,
        subject: &str,
        level: CompatibilityLevel,
    ) -> LensesResult<()> {
        require("subject", subject)?;
        let _: serde_json::Value = self
            .send_registry(
                Method::PUT,
                &format!("{}/{}", CONFIG_PATH, segment(subject)),
                &CompatibilityRequest {
                    compatibility: level,
                },
            )
            .await?;
        Ok(())
    }
}
