//! Users service implementation.

use super::types::{CreateUserRequest, PasswordRequest, UpdateUserRequest, User};
use crate::client::RestClient;
use crate::errors::{LensesError, LensesResult};
use crate::services::{require, segment};
use async_trait::async_trait;
use http::Method;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

const USERS_PATH: &str = "api/v1/user/users";

/// Users service trait for testability
#[async_trait]
pub trait UsersService: Send + Sync {
    /// All users
    async fn list(&self) -> LensesResult<Vec<User>>;

    /// Get a user
    async fn get(&self, username: &str) -> LensesResult<User>;

    /// Create a user
    async fn create(&self, request: CreateUserRequest) -> LensesResult<()>;

    /// Update a user's email and groups
    async fn update(&self, username: &str, request: UpdateUserRequest) -> LensesResult<()>;

    /// Delete a user
    async fn delete(&self, username: &str) -> LensesResult<()>;

    /// Set a new password for a `BASIC` user
    async fn change_password(&self, username: &str, password: SecretString) -> LensesResult<()>;
}

/// Implementation of the Users service
pub struct UsersServiceImpl {
    client: Arc<RestClient>,
}

impl UsersServiceImpl {
    /// Create a new Users service
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    fn user_path(username: &str) -> String {
        format!("{}/{}", USERS_PATH, segment(username))
    }
}

#[async_trait]
impl UsersService for UsersServiceImpl {
    async fn list(&self) -> LensesResult<Vec<User>> {
        self.client.get_json(USERS_PATH).await
    }

    async fn get(&self, username: &str) -> LensesResult<User> {
        require("username", username)?;
        self.client.get_json(&Self::user_path(username)).await
    }

    async fn create(&self, request: CreateUserRequest) -> LensesResult<()> {
        require("username", &request.username)?;
        let missing_password = request
            .password
            .as_ref()
            .map(|p| p.expose_secret().is_empty())
            .unwrap_or(true);
        if request.user_type.eq_ignore_ascii_case("BASIC") && missing_password {
            return Err(LensesError::required("password"));
        }

        self.client
            .send(Method::POST, USERS_PATH, Some(&request))
            .await
    }

    async fn update(&self, username: &str, request: UpdateUserRequest) -> LensesResult<()> {
        require("username", username)?;
        self.client
            .send(Method::PUT, &Self::user_path(username), Some(&request))
            .await
    }

    async fn delete(&self, username: &str) -> LensesResult<()> {
        require("username", username)?;
        self.client.delete(&Self::user_path(username)).await
    }

    async fn change_password(&self, username: &str, password: SecretString) -> LensesResult<()> {
        require("username", username)?;
        if password.expose_secret().is_empty() {
            return Err(LensesError::required("password"));
        }

        let body = PasswordRequest {
            value: password.expose_secret(),
        };
        self.client
            .send(
                Method::PUT,
                &format!("{}/password", Self::user_path(username)),
                Some(&body),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockHttpTransport, MockResponse};

    fn service(transport: &Arc<MockHttpTransport>) -> UsersServiceImpl {
        let client = RestClient::new("http://lenses:9991", transport.clone()).unwrap();
        UsersServiceImpl::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_create_basic_user() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.add_response(MockResponse::empty(201));

        service(&transport)
            .create(CreateUserRequest::basic("alice", "s3cret").group("admins"))
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&sent.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "username": "alice",
                "password": "s3cret",
                "groups": ["admins"],
                "type": "BASIC"
            })
        );
    }

    #[tokio::test]
    async fn test_basic_user_needs_password() {
        let transport = Arc::new(MockHttpTransport::new());

        let result = service(&transport)
            .create(CreateUserRequest::basic("alice", ""))
            .await;

        assert!(matches!(result, Err(LensesError::Validation { .. })));
        assert!(transport.get_requests().is_empty());
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let request = CreateUserRequest::basic("alice", "s3cret");
        assert!(!format!("{:?}", request).contains("s3cret"));
    }

    #[tokio::test]
    async fn test_get_and_update() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.add_response(MockResponse::json(
            200,
            &serde_json::json!({"username": "alice", "groups": ["admins"], "type": "BASIC"}),
        ));
        transport.add_response(MockResponse::empty(200));
        let service = service(&transport);

        let user = service.get("alice").await.unwrap();
        assert_eq!(user.user_type.as_deref(), Some("BASIC"));

        service
            .update(
                "alice",
                UpdateUserRequest {
                    email: Some("alice@example.com".to_string()),
                    groups: vec!["readers".to_string()],
                },
            )
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.url, "http://lenses:9991/api/v1/user/users/alice");
    }

    #[tokio::test]
    async fn test_change_password() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.add_response(MockResponse::empty(200));

        service(&transport)
            .change_password("alice", SecretString::new("n3w".to_string()))
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "http://lenses:9991/api/v1/user/users/alice/password");
        assert_eq!(sent.body, br#"{"value":"n3w"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_delete() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.add_response(MockResponse::empty(204));

        service(&transport).delete("alice").await.unwrap();

        assert_eq!(transport.last_request().unwrap().method, Method::DELETE);
    }
}
