//! Types for the Users service.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// A Lenses user account
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login name
    pub username: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Groups the user belongs to
    #[serde(default)]
    pub groups: Vec<String>,
    /// `BASIC`, `KERBEROS` or `SSO`
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,
}

/// Request to create a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login name
    pub username: String,
    /// Initial password, required for `BASIC` users
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_password"
    )]
    pub password: Option<SecretString>,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Groups the user belongs to
    pub groups: Vec<String>,
    /// `BASIC`, `KERBEROS` or `SSO`
    #[serde(rename = "type")]
    pub user_type: String,
}

impl CreateUserRequest {
    /// A `BASIC` user with a password
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(SecretString::new(password.into())),
            email: None,
            groups: Vec::new(),
            user_type: "BASIC".to_string(),
        }
    }

    /// Add the user to a group
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }
}

/// Request to update a user
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement group list
    pub groups: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct PasswordRequest<'a> {
    pub value: &'a str,
}

fn expose_password<S: Serializer>(
    password: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match password {
        Some(password) => serializer.serialize_some(password.expose_secret().as_str()),
        None => serializer.serialize_none(),
    }
}
