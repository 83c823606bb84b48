//! Login flow and auth header construction.
//!
//! The login exchange is the only call that authenticates with HTTP basic
//! auth (no token exists yet); every other authenticated request derives a
//! bearer header from the session store at call time.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::net::{self, types::LoginResponse};
use crate::session::SessionStore;

/// Header set for a request issued under the current session.
///
/// Pure read of the store, recomputed on every call and never cached
/// across requests. Without a token only the content type is set.
#[must_use]
pub fn auth_headers(store: &SessionStore) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = store.token() {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(error) => {
                tracing::warn!(%error, "stored token is not header-safe; request goes out unauthenticated");
            }
        }
    }
    headers
}

/// Observable phase of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Pending,
    Authenticated,
    Failed,
}

/// Exchanges credentials for a token and populates the session store.
pub struct LoginFlow {
    http: reqwest::Client,
    base_url: String,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: net::build_http_client(config)?,
            base_url: config.base_url.clone(),
            state: LoginState::Idle,
        })
    }

    #[must_use]
    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Run one independent login attempt.
    ///
    /// Empty credentials fail locally and never reach the network; the
    /// flow stays `Idle` because no request was issued. Otherwise exactly
    /// one request goes out and, on success, exactly one store mutation
    /// happens. Every failure path leaves the store untouched.
    pub async fn login(
        &mut self,
        store: &mut SessionStore,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        self.state = LoginState::Idle;
        if username.is_empty() {
            return Err(ApiError::Validation { field: "username" });
        }
        if password.is_empty() {
            return Err(ApiError::Validation { field: "password" });
        }

        self.state = LoginState::Pending;
        let url = format!("{}/login", self.base_url);
        tracing::debug!(%url, %username, "login request");

        let result = self
            .http
            .post(&url)
            .basic_auth(username, Some(password))
            .json(&serde_json::json!({}))
            .send()
            .await;
        let response = match result {
            Ok(response) => response,
            Err(error) => {
                self.state = LoginState::Failed;
                return Err(ApiError::Transport(error.to_string()));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                self.state = LoginState::Failed;
                return Err(ApiError::Transport(error.to_string()));
            }
        };

        if !status.is_success() {
            self.state = LoginState::Failed;
            tracing::debug!(status = status.as_u16(), %body, "login rejected");
            return Err(login_status_error(status));
        }

        match parse_login_response(&body) {
            Ok(token) => {
                store.set(&token, username);
                self.state = LoginState::Authenticated;
                Ok(token)
            }
            Err(error) => {
                self.state = LoginState::Failed;
                Err(error)
            }
        }
    }
}

/// Client-side logout: drop the persisted session. No request is issued.
pub fn logout(store: &mut SessionStore) {
    store.clear();
    tracing::debug!("session cleared");
}

fn login_status_error(status: StatusCode) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Authentication,
        other => ApiError::Transport(format!("unexpected status {}", other.as_u16())),
    }
}

/// Pure decode of the login success body.
fn parse_login_response(json: &str) -> Result<String, ApiError> {
    let parsed: LoginResponse = serde_json::from_str(json)
        .map_err(|error| ApiError::Transport(format!("login response parse failed: {error}")))?;
    Ok(parsed.token)
}
