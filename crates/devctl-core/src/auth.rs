//! Client for the external auth service's user-creation endpoint.
//!
//! The service's response contract is not published. Success and
//! duplicate detection rely on scanning the body for `"id"` and `already`,
//! see [`classify`].

use std::time::Duration;

use serde::Serialize;

use crate::config::{AuthConfig, SuperuserConfig};
use crate::error::{DevError, Result};

/// Payload of a user-creation request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

impl From<&SuperuserConfig> for NewUser {
    fn from(su: &SuperuserConfig) -> Self {
        Self {
            email: su.email.clone(),
            username: su.username.clone(),
            first_name: su.first_name.clone(),
            last_name: su.last_name.clone(),
            password: su.password.clone(),
            role: su.role.clone(),
        }
    }
}

pub trait AuthApi {
    /// POST `user` and return the raw response body, whatever the HTTP status.
    fn create_user(&self, user: &NewUser) -> Result<String>;
}

pub struct HttpAuthClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpAuthClient {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DevError::AuthRequest(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.create_user_endpoint(),
        })
    }
}

impl AuthApi for HttpAuthClient {
    fn create_user(&self, user: &NewUser) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, username = %user.username, "creating auth user");
        let response = self
            .client
            .post(&self.endpoint)
            .json(user)
            .send()
            .map_err(|e| DevError::AuthRequest(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| DevError::AuthRequest(e.to_string()))?;
        tracing::debug!(status = %status, bytes = body.len(), "auth service responded");
        Ok(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
    Unrecognized,
}

/// Classify a user-creation response body.
pub fn classify(body: &str) -> CreateOutcome {
    if body.contains("\"id\"") {
        CreateOutcome::Created
    } else if body.contains("already") {
        CreateOutcome::AlreadyExists
    } else {
        CreateOutcome::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn student() -> NewUser {
        NewUser {
            email: "a@b.com".to_string(),
            username: "a".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "s3cret".to_string(),
            role: "Student".to_string(),
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> HttpAuthClient {
        let config = AuthConfig {
            url: server.url(),
            ..AuthConfig::default()
        };
        HttpAuthClient::new(&config).unwrap()
    }

    #[test]
    fn classify_created() {
        assert_eq!(
            classify(r#"{"id": 12, "username": "admin"}"#),
            CreateOutcome::Created
        );
    }

    #[test]
    fn classify_already_exists() {
        assert_eq!(
            classify(r#"{"username": ["A user with that username already exists."]}"#),
            CreateOutcome::AlreadyExists
        );
    }

    #[test]
    fn classify_other_bodies() {
        assert_eq!(classify(""), CreateOutcome::Unrecognized);
        assert_eq!(
            classify(r#"{"detail": "Internal server error"}"#),
            CreateOutcome::Unrecognized
        );
        // a bare word "id" without quotes is not a created marker
        assert_eq!(classify("invalid payload"), CreateOutcome::Unrecognized);
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", student());
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn superuser_converts_field_for_field() {
        let su = SuperuserConfig::default();
        let user = NewUser::from(&su);
        assert_eq!(user.username, su.username);
        assert_eq!(user.password, su.password);
        assert_eq!(user.role, "Admin");
    }

    #[test]
    fn posts_six_field_json_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/users/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "email": "a@b.com",
                "username": "a",
                "first_name": "A",
                "last_name": "B",
                "password": "s3cret",
                "role": "Student",
            })))
            .with_status(201)
            .with_body(r#"{"id": 7}"#)
            .expect(1)
            .create();

        let body = client_for(&server).create_user(&student()).unwrap();
        assert_eq!(body, r#"{"id": 7}"#);
        mock.assert();
    }

    #[test]
    fn error_status_still_returns_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/users/")
            .with_status(400)
            .with_body(r#"{"email": ["user with this email already exists."]}"#)
            .create();

        let body = client_for(&server).create_user(&student()).unwrap();
        assert_eq!(classify(&body), CreateOutcome::AlreadyExists);
        mock.assert();
    }

    #[test]
    fn unreachable_service_is_an_error() {
        let config = AuthConfig {
            url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..AuthConfig::default()
        };
        let client = HttpAuthClient::new(&config).unwrap();
        assert!(matches!(
            client.create_user(&student()),
            Err(DevError::AuthRequest(_))
        ));
    }
}
