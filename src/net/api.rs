//! Posts resource client.
//!
//! One request per method, no retries, no batching. Mutating calls attach
//! the bearer header derived from the session store at call time; reads
//! are anonymous. The server stays authoritative for ownership; the
//! client-side `policy` module only gates UI affordances.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::StatusCode;

use super::types::{Post, PostDraft};
use crate::auth::auth_headers;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

pub struct BlogApi {
    http: reqwest::Client,
    base_url: String,
}

impl BlogApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: super::build_http_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch all posts, in whatever order the backend delivers them.
    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        let url = format!("{}/blogs", self.base_url);
        tracing::debug!(%url, "list posts");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = read_success(response).await?;
        parse_posts(&body)
    }

    /// Fetch one post by id.
    pub async fn get(&self, id: i64) -> Result<Post, ApiError> {
        let url = format!("{}/blogs/{id}", self.base_url);
        tracing::debug!(%url, "get post");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = read_success(response).await?;
        parse_post(&body)
    }

    /// Create a post. The server assigns id, timestamp, and owner.
    pub async fn create(&self, store: &SessionStore, draft: &PostDraft) -> Result<Post, ApiError> {
        let url = format!("{}/blogs", self.base_url);
        tracing::debug!(%url, title = %draft.title, "create post");
        let response = self
            .http
            .post(&url)
            .headers(auth_headers(store))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        let body = read_success(response).await?;
        parse_post(&body)
    }

    /// Overwrite the title and content of an owned post.
    pub async fn update(
        &self,
        store: &SessionStore,
        id: i64,
        draft: &PostDraft,
    ) -> Result<Post, ApiError> {
        let url = format!("{}/blogs/{id}", self.base_url);
        tracing::debug!(%url, "update post");
        let response = self
            .http
            .put(&url)
            .headers(auth_headers(store))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        let body = read_success(response).await?;
        parse_post(&body)
    }

    /// Delete an owned post. The success response carries no body.
    pub async fn delete(&self, store: &SessionStore, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/blogs/{id}", self.base_url);
        tracing::debug!(%url, "delete post");
        let response = self
            .http
            .delete(&url)
            .headers(auth_headers(store))
            .send()
            .await
            .map_err(transport)?;
        read_success(response).await?;
        Ok(())
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

/// Drain the body, logging it at debug on rejection, and map the status.
async fn read_success(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if status.is_success() {
        return Ok(body);
    }
    tracing::debug!(status = status.as_u16(), %body, "request rejected");
    Err(status_error(status))
}

/// Status taxonomy for resource calls. The backend answers 401 for missing
/// identity and 403 for wrong identity; both surface as not-the-owner.
fn status_error(status: StatusCode) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Authorization,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        other => ApiError::Transport(format!("unexpected status {}", other.as_u16())),
    }
}

fn parse_post(json: &str) -> Result<Post, ApiError> {
    serde_json::from_str(json)
        .map_err(|error| ApiError::Transport(format!("post parse failed: {error}")))
}

fn parse_posts(json: &str) -> Result<Vec<Post>, ApiError> {
    serde_json::from_str(json)
        .map_err(|error| ApiError::Transport(format!("post list parse failed: {error}")))
}
