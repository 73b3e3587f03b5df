//! Hosted authentication client
//!
//! Talks to the backend's auth endpoints: sign up, password sign-in,
//! password-reset request, and sign-out. Responses carry a bearer token that
//! the REST client then attaches to every request.

use chrono::{Duration, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SpendwiseError, SpendwiseResult};

use super::session::Session;

/// Client for the hosted auth API
pub struct AuthClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds
    expires_in: i64,
    user: UserResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "error_description", alias = "msg", alias = "message")]
    error: Option<String>,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Register a new account. The backend signs the user in immediately.
    pub fn sign_up(&self, email: &str, password: &str) -> SpendwiseResult<Session> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&CredentialsRequest { email, password })
            .send()?;

        let session = self.session_from_response(response)?;
        info!(user_id = %session.user_id, "signed up");
        Ok(session)
    }

    /// Sign in with email and password
    pub fn sign_in(&self, email: &str, password: &str) -> SpendwiseResult<Session> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&CredentialsRequest { email, password })
            .send()?;

        let session = self.session_from_response(response)?;
        info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    /// Request a password-reset email
    pub fn request_password_reset(&self, email: &str) -> SpendwiseResult<()> {
        let url = format!("{}/auth/v1/recover", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&RecoverRequest { email })
            .send()?;

        Self::check_status(response)?;
        Ok(())
    }

    /// Invalidate the session server-side
    pub fn sign_out(&self, access_token: &str) -> SpendwiseResult<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()?;

        Self::check_status(response)?;
        Ok(())
    }

    fn session_from_response(
        &self,
        response: reqwest::blocking::Response,
    ) -> SpendwiseResult<Session> {
        let response = Self::check_status(response)?;
        let token: TokenResponse = response
            .json()
            .map_err(|e| SpendwiseError::Auth(format!("Unexpected auth response: {}", e)))?;

        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
            user_id: token.user.id,
            email: token.user.email,
        })
    }

    /// Map non-success responses to an API error with the server's message
    fn check_status(
        response: reqwest::blocking::Response,
    ) -> SpendwiseResult<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorResponse>()
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").into());

        Err(SpendwiseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_BODY: &str = r#"{
        "access_token": "tok-abc",
        "refresh_token": "ref-xyz",
        "expires_in": 3600,
        "user": {"id": "user-1", "email": "user@example.com"}
    }"#;

    #[test]
    fn test_sign_in_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "password".into(),
            ))
            .match_header("apikey", "public-key")
            .with_status(200)
            .with_body(TOKEN_BODY)
            .create();

        let client = AuthClient::new(server.url(), "public-key");
        let session = client.sign_in("user@example.com", "hunter2").unwrap();

        mock.assert();
        assert_eq!(session.access_token, "tok-abc");
        assert_eq!(session.user_id, "user-1");
        assert!(!session.is_expired());
    }

    #[test]
    fn test_sign_in_bad_credentials() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_description": "Invalid login credentials"}"#)
            .create();

        let client = AuthClient::new(server.url(), "public-key");
        let err = client.sign_in("user@example.com", "wrong").unwrap_err();

        match err {
            SpendwiseError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_sign_up_success() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(TOKEN_BODY)
            .create();

        let client = AuthClient::new(server.url(), "public-key");
        let session = client.sign_up("user@example.com", "hunter2").unwrap();
        assert_eq!(session.email, "user@example.com");
    }

    #[test]
    fn test_password_reset_and_logout() {
        let mut server = mockito::Server::new();
        let recover = server
            .mock("POST", "/auth/v1/recover")
            .with_status(200)
            .with_body("{}")
            .create();
        let logout = server
            .mock("POST", "/auth/v1/logout")
            .match_header("authorization", "Bearer tok-abc")
            .with_status(204)
            .create();

        let client = AuthClient::new(server.url(), "public-key");
        client.request_password_reset("user@example.com").unwrap();
        client.sign_out("tok-abc").unwrap();

        recover.assert();
        logout.assert();
    }
}
